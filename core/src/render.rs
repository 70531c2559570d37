//! HTML rendering of the view model.
//!
//! Elements that accept input carry `data-id` and `data-action` attributes so
//! a host can route events back to `TodoApp::toggle`, `edit` and `delete`.

use crate::app::{TodoApp, ViewState};

pub fn render(app: &TodoApp) -> String {
    match app.state() {
        ViewState::Loading => "<p>Loading...</p>".to_string(),
        ViewState::Failed(message) => format!("<p>Error: {}</p>", escape(message)),
        ViewState::Ready => render_list(app),
    }
}

fn render_list(app: &TodoApp) -> String {
    let mut html = String::from("<div class=\"todo-app\"><h1>Todo App</h1><ul>");
    for todo in app.todos() {
        let id = escape(&todo.id);
        let text = escape(&todo.text);
        let decoration = if todo.completed { "line-through" } else { "none" };
        html.push_str(&format!(
            "<li data-id=\"{id}\">\
             <span data-action=\"toggle\" style=\"text-decoration: {decoration}; cursor: pointer;\">{text}</span>\
             <input type=\"text\" data-action=\"edit\" value=\"{text}\">\
             <button data-action=\"delete\">Delete</button>\
             </li>"
        ));
    }
    html.push_str(&format!(
        "</ul><div>\
         <input type=\"text\" data-action=\"new-todo\" value=\"{}\">\
         <button data-action=\"add\">Add Todo</button>\
         </div></div>",
        escape(app.new_todo_text())
    ));
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
