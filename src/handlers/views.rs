//! Minimal inline page rendering. The app speaks plain HTML forms; there is no
//! template engine by design.

use axum::response::Html;

use crate::db::models::Book;

pub fn landing_page() -> Html<String> {
    page(
        "Shelfmark",
        "<h1>Shelfmark</h1>\
         <p>Track the books you read.</p>\
         <p><a href=\"/login\">Log in</a> or <a href=\"/register\">Register</a></p>",
    )
}

pub fn login_page(flash: Option<&str>) -> Html<String> {
    let notice = match flash {
        Some(msg) => format!("<p class=\"error\">{}</p>", escape(msg)),
        None => String::new(),
    };
    page(
        "Log in",
        &format!(
            "<h1>Log in</h1>{notice}\
             <form method=\"post\" action=\"/login\">\
             <input name=\"userEmail\" type=\"email\" placeholder=\"Email\">\
             <input name=\"userPassword\" type=\"password\" placeholder=\"Password\">\
             <button type=\"submit\">Log in</button>\
             </form>"
        ),
    )
}

pub fn register_page() -> Html<String> {
    page(
        "Register",
        "<h1>Register</h1>\
         <form method=\"post\" action=\"/register\">\
         <input name=\"userName\" placeholder=\"Name\">\
         <input name=\"userEmail\" type=\"email\" placeholder=\"Email\">\
         <input name=\"userPassword\" type=\"password\" placeholder=\"Password\">\
         <button type=\"submit\">Register</button>\
         </form>",
    )
}

pub fn home_page(username: &str, books: &[Book]) -> Html<String> {
    let listing = if books.is_empty() {
        "<p>No books yet.</p>".to_string()
    } else {
        let items: String = books.iter().map(book_item).collect();
        format!("<ul>{items}</ul>")
    };
    page(
        "Your books",
        &format!(
            "<h1>{}'s books</h1>{listing}\
             <p><a href=\"/addNew\">Add a book</a> | <a href=\"/logout\">Log out</a></p>",
            escape(username)
        ),
    )
}

pub fn add_page() -> Html<String> {
    page(
        "Add a book",
        "<h1>Add a book</h1>\
         <form method=\"post\" action=\"/add\">\
         <input name=\"title\" placeholder=\"Title\">\
         <input name=\"author\" placeholder=\"Author\">\
         <input name=\"status\" placeholder=\"Status\">\
         <input name=\"rate\" type=\"number\" min=\"1\" max=\"5\" value=\"3\">\
         <textarea name=\"notes\" placeholder=\"Notes\"></textarea>\
         <button type=\"submit\">Add</button>\
         </form>\
         <p><a href=\"/home\">Back to your books</a></p>",
    )
}

pub fn detail_page(book: &Book) -> Html<String> {
    page(
        &book.title,
        &format!(
            "<h1>{title}</h1>\
             <p>by {author}</p>\
             <form method=\"post\" action=\"/edit\">\
             <input type=\"hidden\" name=\"updatedBookId\" value=\"{id}\">\
             <input name=\"title\" value=\"{title}\">\
             <input name=\"author\" value=\"{author}\">\
             <input name=\"status\" value=\"{status}\">\
             <input name=\"rate\" type=\"number\" min=\"1\" max=\"5\" value=\"{rate}\">\
             <textarea name=\"notes\">{notes}</textarea>\
             <button type=\"submit\">Save</button>\
             </form>\
             <form method=\"post\" action=\"/delete\">\
             <input type=\"hidden\" name=\"deletedBookId\" value=\"{id}\">\
             <button type=\"submit\">Delete</button>\
             </form>",
            id = book.id,
            title = escape(&book.title),
            author = escape(&book.author),
            status = escape(&book.status),
            rate = book.rate.unwrap_or(0),
            notes = escape(book.notes.as_deref().unwrap_or("")),
        ),
    )
}

fn book_item(book: &Book) -> String {
    let rate = book
        .rate
        .map(|r| format!(", rated {r}/5"))
        .unwrap_or_default();
    format!(
        "<li><a href=\"/detail/{id}\">{title}</a> by {author} ({status}{rate})</li>",
        id = book.id,
        title = escape(&book.title),
        author = escape(&book.author),
        status = escape(&book.status),
    )
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title></head>\
         <body>{body}</body></html>",
        escape(title)
    ))
}

/// Escapes user-supplied text for embedding in HTML.
fn escape(raw: &str) -> String {
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
