//! Named views and the port that renders them.
//!
//! Handlers pick a [`ViewName`] and fill a JSON data bag; they never build
//! markup. [`HtmlViewRenderer`] is the production renderer and escapes every
//! interpolated value.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::Error;

/// Logical page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewName {
    Login,
    Register,
    Dashboard,
}

/// A view selection plus its data bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    name: ViewName,
    model: Map<String, Value>,
}

impl View {
    /// Empty data bag for `name`.
    pub fn new(name: ViewName) -> Self {
        Self {
            name,
            model: Map::new(),
        }
    }

    /// Add an entry to the data bag.
    ///
    /// # Errors
    ///
    /// Returns an internal error if `value` cannot be represented as JSON.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Result<Self, Error> {
        let value = serde_json::to_value(value)
            .map_err(|err| Error::internal(format!("failed to serialise view data: {err}")))?;
        self.model.insert(key.to_owned(), value);
        Ok(self)
    }

    /// Set a boolean flag in the data bag.
    pub fn with_flag(mut self, key: &str) -> Self {
        self.model.insert(key.to_owned(), Value::Bool(true));
        self
    }

    pub fn name(&self) -> ViewName {
        self.name
    }

    pub fn model(&self) -> &Map<String, Value> {
        &self.model
    }
}

/// Turns a [`View`] into a response body.
pub trait ViewRenderer: Send + Sync {
    /// Render `view` to HTML.
    fn render(&self, view: &View) -> Result<String, Error>;
}

/// Minimal self-contained HTML pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlViewRenderer;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

fn text<'a>(model: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    model.get(key).and_then(Value::as_str)
}

fn flag(model: &Map<String, Value>, key: &str) -> bool {
    model.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n"
    )
}

fn notice(class: &str, message: &str) -> String {
    format!("<p class=\"{class}\">{}</p>\n", escape(message))
}

fn render_login(model: &Map<String, Value>) -> String {
    let mut body = String::new();
    if flag(model, "registered") {
        body.push_str(&notice("info", "Registration successful. Please log in."));
    }
    if flag(model, "logout") {
        body.push_str(&notice("info", "You have been logged out."));
    }
    if flag(model, "error") {
        body.push_str(&notice("error", "Invalid username or password."));
    }
    body.push_str(concat!(
        "<form method=\"post\" action=\"/login\">\n",
        "<label>Username <input name=\"username\" required></label>\n",
        "<label>Password <input type=\"password\" name=\"password\" required></label>\n",
        "<button type=\"submit\">Log in</button>\n",
        "</form>\n",
        "<p><a href=\"/register\">Create an account</a></p>\n",
    ));
    page("Login", &body)
}

fn render_register(model: &Map<String, Value>) -> String {
    let mut body = String::new();
    if let Some(message) = text(model, "error") {
        body.push_str(&notice("error", message));
    }
    let username = escape(text(model, "username").unwrap_or_default());
    let email = escape(text(model, "email").unwrap_or_default());
    body.push_str(&format!(
        concat!(
            "<form method=\"post\" action=\"/register\">\n",
            "<label>Username <input name=\"username\" value=\"{username}\" required></label>\n",
            "<label>Email <input type=\"email\" name=\"email\" value=\"{email}\" required></label>\n",
            "<label>Password <input type=\"password\" name=\"password\" required></label>\n",
            "<button type=\"submit\">Register</button>\n",
            "</form>\n",
            "<p><a href=\"/login\">Already registered? Log in</a></p>\n",
        ),
        username = username,
        email = email,
    ));
    page("Register", &body)
}

fn render_dashboard(model: &Map<String, Value>) -> Result<String, Error> {
    let username = escape(text(model, "username").unwrap_or_default());
    let total = model
        .get("totalUsers")
        .and_then(Value::as_u64)
        .unwrap_or_default();
    let users = model
        .get("users")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut rows = String::new();
    for user in users {
        let field = |key: &str| escape(user.get(key).and_then(Value::as_str).unwrap_or_default());
        writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td></tr>",
            field("username"),
            field("email")
        )
        .map_err(|err| Error::internal(format!("failed to render dashboard: {err}")))?;
    }

    let body = format!(
        concat!(
            "<p>Welcome, {username}!</p>\n",
            "<p>Total users: {total}</p>\n",
            "<table>\n<thead><tr><th>Username</th><th>Email</th></tr></thead>\n",
            "<tbody>\n{rows}</tbody>\n</table>\n",
            "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>\n",
        ),
        username = username,
        total = total,
        rows = rows,
    );
    Ok(page("Dashboard", &body))
}

impl ViewRenderer for HtmlViewRenderer {
    fn render(&self, view: &View) -> Result<String, Error> {
        match view.name() {
            ViewName::Login => Ok(render_login(view.model())),
            ViewName::Register => Ok(render_register(view.model())),
            ViewName::Dashboard => render_dashboard(view.model()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn render(view: View) -> String {
        HtmlViewRenderer.render(&view).expect("render")
    }

    #[rstest]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[rstest]
    #[case("registered", "Registration successful")]
    #[case("logout", "You have been logged out")]
    #[case("error", "Invalid username or password")]
    fn login_flags_show_notices(#[case] key: &str, #[case] expected: &str) {
        let html = render(View::new(ViewName::Login).with_flag(key));
        assert!(html.contains(expected), "{html}");
    }

    #[rstest]
    fn plain_login_has_no_notices() {
        let html = render(View::new(ViewName::Login));
        assert!(!html.contains("class=\"info\""));
        assert!(!html.contains("class=\"error\""));
        assert!(html.contains("action=\"/login\""));
    }

    #[rstest]
    fn register_echoes_escaped_values() {
        let view = View::new(ViewName::Register)
            .with("error", "Username already exists")
            .and_then(|v| v.with("username", "<bob>"))
            .and_then(|v| v.with("email", "bob@example.com"))
            .expect("view data");
        let html = render(view);

        assert!(html.contains("Username already exists"));
        assert!(html.contains("value=\"&lt;bob&gt;\""));
        assert!(html.contains("value=\"bob@example.com\""));
    }

    #[rstest]
    fn dashboard_lists_users_and_total() {
        let view = View::new(ViewName::Dashboard)
            .with("username", "alice")
            .and_then(|v| {
                v.with(
                    "users",
                    json!([
                        {"id": "1", "username": "alice", "email": "a@example.com"},
                        {"id": "2", "username": "<script>", "email": "s@example.com"},
                    ]),
                )
            })
            .and_then(|v| v.with("totalUsers", 2))
            .expect("view data");
        let html = render(view);

        assert!(html.contains("Welcome, alice!"));
        assert!(html.contains("Total users: 2"));
        assert!(html.contains("<td>a@example.com</td>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[rstest]
    fn view_serialises_name_and_model() {
        let view = View::new(ViewName::Dashboard)
            .with("totalUsers", 0)
            .expect("view data");
        assert_eq!(
            serde_json::to_value(&view).expect("serialise"),
            json!({"name": "dashboard", "model": {"totalUsers": 0}})
        );
    }
}
