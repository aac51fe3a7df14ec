//! HTML for the admin index page.

use std::fmt::Write as _;

use crate::model::Event;

pub(super) fn render(events: &[Event]) -> String {
    let mut html = String::from(
        "<!doctype html>\n<html lang=\"ja\">\n<head><meta charset=\"utf-8\"><title>Events</title></head>\n<body>\n<h1>Events</h1>\n",
    );

    if events.is_empty() {
        html.push_str("<p>No events.</p>\n");
    }

    for event in events {
        let name = escape(&event.name);
        let _ = write!(
            html,
            "<section>\n<h2>{name}</h2>\n\
             <form method=\"post\" action=\"/edit\">\n\
             <input type=\"hidden\" name=\"original_name\" value=\"{name}\">\n\
             {fields}\
             <button type=\"submit\">Save</button>\n</form>\n\
             <form method=\"post\" action=\"/delete\">\n\
             <input type=\"hidden\" name=\"name\" value=\"{name}\">\n\
             <button type=\"submit\">Delete</button>\n</form>\n</section>\n",
            fields = fields(Some(event)),
        );
    }

    let _ = write!(
        html,
        "<h2>Add event</h2>\n<form method=\"post\" action=\"/add\">\n{}\
         <button type=\"submit\">Add</button>\n</form>\n</body>\n</html>\n",
        fields(None),
    );
    html
}

fn fields(event: Option<&Event>) -> String {
    let value = |f: fn(&Event) -> String| event.map(f).map(|v| escape(&v)).unwrap_or_default();
    let rows = [
        ("name", "Name", value(|e| e.name.clone())),
        ("aliases", "Aliases (comma separated)", value(|e| e.aliases.join(","))),
        ("start", "Start (YYYY-MM-DD)", value(|e| e.start.clone())),
        ("end", "End (YYYY-MM-DD)", value(|e| e.end.clone())),
        ("content", "Content", value(|e| e.content.clone())),
        ("reward", "Reward", value(|e| e.reward.clone())),
    ];

    let mut out = String::new();
    for (field, label, current) in rows {
        let _ = writeln!(
            out,
            "<label>{label} <input name=\"{field}\" value=\"{current}\"></label><br>"
        );
    }
    out
}

/// Escape text for use in element bodies and quoted attributes.
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
