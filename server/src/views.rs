//! Server-rendered pages for the users resource.

use std::fmt::Write;

use crate::models::user::{FormValues, User, UserSummary};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape(message)),
        None => String::new(),
    }
}

// Rows are rebuilt client side from the JSON a delete returns.
const DELETE_SCRIPT: &str = r#"<script>
async function deleteUser(id) {
  const res = await fetch("/users/" + encodeURIComponent(id), { method: "DELETE" });
  const body = await res.json();
  if (!body.success) { alert(body.message); return; }
  const list = document.getElementById("users");
  list.replaceChildren();
  for (const user of body.data) {
    const li = document.createElement("li");
    const a = document.createElement("a");
    a.href = "/users/" + user.id;
    a.textContent = user.name;
    li.appendChild(a);
    list.appendChild(li);
  }
}
</script>"#;

pub fn list_page(users: &[UserSummary], search: Option<&str>) -> String {
    let mut body = String::from("<h1>Users</h1>\n");
    let _ = write!(
        body,
        "<form method=\"get\" action=\"/users\">\
         <input type=\"search\" name=\"search\" value=\"{}\">\
         <button type=\"submit\">Search</button></form>\n\
         <p><a href=\"/users/new\">New user</a></p>\n<ul id=\"users\">\n",
        escape(search.unwrap_or_default())
    );
    for user in users {
        let _ = writeln!(
            body,
            "<li><a href=\"/users/{id}\">{name}</a> \
             <a href=\"/users/{id}/edit\">Edit</a> \
             <button type=\"button\" onclick=\"deleteUser('{id}')\">Delete</button></li>",
            id = user.id,
            name = escape(&user.name)
        );
    }
    body.push_str("</ul>\n");
    if users.is_empty() {
        body.push_str("<p>No users found.</p>\n");
    }
    body.push_str(DELETE_SCRIPT);
    layout("Users", &body)
}

fn user_fields(values: &FormValues) -> String {
    format!(
        "<label>Name <input type=\"text\" name=\"name\" value=\"{}\" required></label>\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{}\" required></label>\n",
        escape(&values.name),
        escape(&values.email)
    )
}

pub fn create_form(values: &FormValues, error: Option<&str>) -> String {
    let body = format!(
        "<h1>New user</h1>\n{}<form method=\"post\" action=\"/users\">\n{}\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Create</button>\n</form>\n<p><a href=\"/users\">Back</a></p>",
        error_banner(error),
        user_fields(values)
    );
    layout("New user", &body)
}

pub fn detail_page(user: &User) -> String {
    let body = format!(
        "<h1>{name}</h1>\n<dl>\n<dt>Id</dt><dd>{id}</dd>\n<dt>Name</dt><dd>{name}</dd>\n\
         <dt>Email</dt><dd>{email}</dd>\n</dl>\n\
         <p><a href=\"/users/{id}/edit\">Edit</a> <a href=\"/users\">Back</a></p>",
        id = user.id,
        name = escape(&user.name),
        email = escape(&user.email)
    );
    layout(&user.name, &body)
}

pub fn edit_form(id: &str, values: &FormValues, error: Option<&str>) -> String {
    let id = escape(id);
    let body = format!(
        "<h1>Edit user</h1>\n{}<form method=\"post\" action=\"/users/{}\">\n{}\
         <button type=\"submit\">Save</button>\n</form>\n<p><a href=\"/users\">Back</a></p>",
        error_banner(error),
        id,
        user_fields(values)
    );
    layout("Edit user", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Error</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/users\">Back to users</a></p>",
        escape(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<b onclick='x'>&\"</b>"),
            "&lt;b onclick=&#39;x&#39;&gt;&amp;&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn list_page_links_each_user() {
        let id = Uuid::new_v4();
        let page = list_page(
            &[UserSummary {
                id,
                name: "<Bob>".to_owned(),
            }],
            Some("bo"),
        );
        assert!(page.contains(&format!("href=\"/users/{}\"", id)));
        assert!(page.contains("&lt;Bob&gt;"));
        assert!(page.contains("value=\"bo\""));
        assert!(!page.contains("No users found."));
    }

    #[test]
    fn create_form_never_prefills_password() {
        let values = FormValues {
            name: "Bob".to_owned(),
            email: "b@x.com".to_owned(),
        };
        let page = create_form(&values, Some("Failed to create user"));
        assert!(page.contains("value=\"Bob\""));
        assert!(page.contains("value=\"b@x.com\""));
        assert!(page.contains("Failed to create user"));
        assert!(page.contains("name=\"password\" required>"));
    }

    #[test]
    fn detail_page_hides_password() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Bob".to_owned(),
            email: "b@x.com".to_owned(),
            password: "secret-pw".to_owned(),
        };
        let page = detail_page(&user);
        assert!(page.contains("b@x.com"));
        assert!(!page.contains("secret-pw"));
    }
}
