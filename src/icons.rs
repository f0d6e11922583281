//! Inline SVG icons (15x15 outline set).

pub const HOME: &str = r#"<svg class="icon" viewBox="0 0 15 15" width="16" height="16" aria-hidden="true"><path d="M7.08.22a.75.75 0 0 1 .84 0l6.75 4.5a.75.75 0 0 1-.42 1.37H13.5v7.65a.75.75 0 0 1-.75.75h-3a.75.75 0 0 1-.75-.75V10.5H6v3.24a.75.75 0 0 1-.75.75h-3a.75.75 0 0 1-.75-.75V6.09h-.75A.75.75 0 0 1 .33 4.72ZM3 5.49v7.5h1.5V9.75A.75.75 0 0 1 5.25 9h4.5a.75.75 0 0 1 .75.75v3.24H12v-7.5L7.5 2.49Z" fill="currentColor"></path></svg>"#;

pub const SUN: &str = r#"<svg class="icon icon-sun" viewBox="0 0 15 15" width="24" height="24" aria-hidden="true"><path d="M7.5 0a.5.5 0 0 1 .5.5v2a.5.5 0 0 1-1 0v-2a.5.5 0 0 1 .5-.5ZM2.197 2.197a.5.5 0 0 1 .707 0L4.318 3.61a.5.5 0 0 1-.707.707L2.197 2.904a.5.5 0 0 1 0-.707ZM.5 7a.5.5 0 0 0 0 1h2a.5.5 0 0 0 0-1h-2Zm12 0a.5.5 0 0 0 0 1h2a.5.5 0 0 0 0-1h-2ZM7.5 12a.5.5 0 0 1 .5.5v2a.5.5 0 0 1-1 0v-2a.5.5 0 0 1 .5-.5Zm3.182-8.39a.5.5 0 0 0 .707.707l1.414-1.414a.5.5 0 0 0-.707-.707L10.682 3.61ZM7.5 4.5a3 3 0 1 0 0 6 3 3 0 0 0 0-6Zm-2 3a2 2 0 1 1 4 0 2 2 0 0 1-4 0Z" fill="currentColor"></path></svg>"#;

pub const MOON: &str = r#"<svg class="icon icon-moon" viewBox="0 0 15 15" width="24" height="24" aria-hidden="true"><path d="M2.9.5a.4.4 0 0 0-.8 0v.6h-.6a.4.4 0 1 0 0 .8h.6v.6a.4.4 0 1 0 .8 0v-.6h.6a.4.4 0 0 0 0-.8h-.6V.5Zm3.04 1.36a.5.5 0 0 1 .1.55A5.5 5.5 0 0 0 12.6 9a.5.5 0 0 1 .65.65A6.5 6.5 0 1 1 5.4 1.75a.5.5 0 0 1 .55.11ZM4.8 3.2a5.5 5.5 0 1 0 7 7.1A6.5 6.5 0 0 1 4.8 3.2Z" fill="currentColor"></path></svg>"#;

pub const HAMBURGER: &str = r#"<svg class="icon" viewBox="0 0 15 15" width="24" height="24" aria-hidden="true"><path d="M1.5 3a.5.5 0 0 0 0 1h12a.5.5 0 0 0 0-1h-12ZM1 7.5a.5.5 0 0 1 .5-.5h12a.5.5 0 0 1 0 1h-12a.5.5 0 0 1-.5-.5Zm0 4a.5.5 0 0 1 .5-.5h12a.5.5 0 0 1 0 1h-12a.5.5 0 0 1-.5-.5Z" fill="currentColor"></path></svg>"#;

pub const COPY: &str = r#"<svg class="icon icon-copy" viewBox="0 0 15 15" width="24" height="24" aria-hidden="true"><path d="M1 9.5A1.5 1.5 0 0 0 2.5 11H4v-1H2.5a.5.5 0 0 1-.5-.5v-7a.5.5 0 0 1 .5-.5h7a.5.5 0 0 1 .5.5V4H5.5A1.5 1.5 0 0 0 4 5.5v7A1.5 1.5 0 0 0 5.5 14h7a1.5 1.5 0 0 0 1.5-1.5v-7A1.5 1.5 0 0 0 12.5 4H11V2.5A1.5 1.5 0 0 0 9.5 1h-7A1.5 1.5 0 0 0 1 2.5v7Zm4-4a.5.5 0 0 1 .5-.5h7a.5.5 0 0 1 .5.5v7a.5.5 0 0 1-.5.5h-7a.5.5 0 0 1-.5-.5v-7Z" fill="currentColor"></path></svg>"#;

pub const CHECK: &str = r#"<svg class="icon icon-check" viewBox="0 0 15 15" width="24" height="24" aria-hidden="true"><path d="M11.467 3.727a.5.5 0 0 1 .06.705l-5 6a.5.5 0 0 1-.737.03l-2.5-2.5a.5.5 0 1 1 .708-.707l2.112 2.113 4.652-5.582a.5.5 0 0 1 .705-.059Z" fill="currentColor"></path></svg>"#;

pub const CROSS: &str = r#"<svg class="icon icon-failed" viewBox="0 0 15 15" width="24" height="24" aria-hidden="true"><path d="M11.782 4.032a.575.575 0 1 0-.813-.814L7.5 6.687 4.032 3.218a.575.575 0 0 0-.814.814L6.687 7.5l-3.469 3.468a.575.575 0 0 0 .814.814L7.5 8.313l3.469 3.469a.575.575 0 0 0 .813-.814L8.313 7.5l3.469-3.468Z" fill="currentColor"></path></svg>"#;
