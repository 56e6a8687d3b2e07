// HTML views rendered with minijinja
// Decision: Templates are compiled into the binary; `.html` names turn on autoescaping

use axum::response::Html;
use minijinja::{Environment, Value};

use crate::error::ApiError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("main.html", include_str!("../templates/main.html")),
    ("signup.html", include_str!("../templates/signup.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("new.html", include_str!("../templates/new.html")),
    ("show.html", include_str!("../templates/show.html")),
    ("edit.html", include_str!("../templates/edit.html")),
    (
        "delete_confirm.html",
        include_str!("../templates/delete_confirm.html"),
    ),
];

/// Template environment shared by all handlers
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Load and compile every template; fails on a syntax error
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<Html<String>, ApiError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}
