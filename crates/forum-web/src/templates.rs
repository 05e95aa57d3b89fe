//! Server-rendered pages
//!
//! Templates are compiled into the binary and loaded once at startup.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::response::WebResult;

/// Every page template, keyed by the name handlers render
const PAGES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("sign_up.html", include_str!("../templates/sign_up.html")),
    ("create_topic.html", include_str!("../templates/create_topic.html")),
    ("thread.html", include_str!("../templates/thread.html")),
];

/// Compiled page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compile all pages
    ///
    /// `app_name` is available to every page as a global.
    pub fn new(app_name: &str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in PAGES {
            env.add_template(name, source)?;
        }
        env.add_global("app_name", app_name.to_string());
        Ok(Self { env })
    }

    /// Render a page with the given context
    pub fn render<C: Serialize>(&self, name: &str, ctx: C) -> WebResult<Html<String>> {
        let html = self.env.get_template(name)?.render(ctx)?;
        Ok(Html(html))
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("pages", &PAGES.len())
            .finish()
    }
}
