//! Snippet service client
//!
//! Three endpoints, all JSON:
//!
//! - `POST /api/auth/login` `{email, password}` → `{token}`
//! - `POST /api/snippets` (bearer token) `{title, html, css, js}` → `{shareId}`
//! - `GET /api/snippets/share/{id}` → `{title, html, css, js}`

mod client;
mod types;

pub use client::{HttpSnippetApi, SnippetApi};
pub use types::{LoginResponse, SaveSnippetResponse, SnippetPayload};
