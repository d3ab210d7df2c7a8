//! Configuration section definitions.
//!
//! Each module corresponds to a section in `quire.toml`:
//!
//! | Module   | TOML Section | Purpose                                 |
//! |----------|--------------|-----------------------------------------|
//! | `info`   | `[site]`     | Site title and base URL                 |
//! | `paths`  | `[paths]`    | Content, link and static directories    |
//! | `render` | `[render]`   | Renderer program, templates, timeout    |
//! | `jobs`   | `[build]`    | Worker pool size                        |

mod info;
mod jobs;
mod paths;
mod render;

pub use info::SiteInfoConfig;
pub use jobs::BuildConfig;
pub use paths::PathsConfig;
pub use render::RenderConfig;
