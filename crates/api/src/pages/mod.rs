//! Server-rendered HTML pages.
//!
//! Pages are composed with `format!` into a single string. Every value that
//! comes from the request or the database passes through [`escape_html`].

pub mod product_search;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
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

/// Wrap page content in the shared document shell.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:60rem;padding:0 1rem}\
form.filters{display:flex;flex-wrap:wrap;gap:1rem;align-items:flex-end;margin-bottom:1.5rem}\
fieldset{border:1px solid #ccc}\
ul.products{list-style:none;padding:0}\
li.product{border-bottom:1px solid #eee;padding:.75rem 0}\
.price{font-weight:bold}\
.tag{background:#eef;border-radius:3px;margin-right:.25rem;padding:0 .3rem}\
.notice{background:#fee;border:1px solid #c99;padding:.5rem}";
