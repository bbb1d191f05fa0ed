//! HTML Views
//!
//! Server-rendered pages for the landing, search and error views.
//! All interpolated text is escaped.

use std::fmt::Write;

use crate::models::PokemonView;
use crate::pokemon::display_name;

/// Client script served at `/static/main.js`.
pub const MAIN_JS: &str = include_str!("../../static/main.js");

/// Landing page: optional random example plus the search form.
pub fn index_page(random: Option<&PokemonView>, notices: &[String]) -> String {
    let mut body = String::new();
    body.push_str(&search_form("/"));

    match random {
        Some(pokemon) => {
            body.push_str("<h2>Random Pokemon</h2>\n");
            body.push_str(&pokemon_card(pokemon));
        }
        None => body.push_str("<p class=\"no-example\">No random Pokemon available right now.</p>\n"),
    }

    layout("Pokedex", notices, &body)
}

/// Search result page.
pub fn search_page(pokemon: &PokemonView, notices: &[String]) -> String {
    let mut body = String::new();
    body.push_str(&search_form("/pokemon"));
    body.push_str(&pokemon_card(pokemon));
    body.push_str("<p><a href=\"/\">Back</a></p>\n");

    layout(&format!("{} | Pokedex", pokemon.name), notices, &body)
}

pub fn error_page(notices: &[String]) -> String {
    let body = "<h2>Something went wrong</h2>\n\
                <p>We could not reach the Pokemon database. Please try again later.</p>\n\
                <p><a href=\"/\">Back to the Pokedex</a></p>\n";
    layout("Error | Pokedex", notices, body)
}

fn layout(title: &str, notices: &[String], body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<script src=\"/static/main.js\" defer></script>\n</head>\n<body>\n\
         <header><h1><a href=\"/\">Pokedex</a></h1></header>\n<main>\n",
        escape(title)
    );

    for notice in notices {
        let _ = writeln!(html, "<div class=\"flash-message\">{}</div>", escape(notice));
    }

    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn search_form(action: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\">\n\
         <input type=\"text\" name=\"pokemon\" placeholder=\"Name or ID\" autocomplete=\"off\">\n\
         <button type=\"submit\">Search</button>\n</form>\n",
        escape(action)
    )
}

fn pokemon_card(pokemon: &PokemonView) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<section class=\"pokemon\">");
    let _ = writeln!(
        html,
        "<h3 class=\"pokemon-name\">{} <span class=\"pokemon-id\">#{}</span></h3>",
        escape(&pokemon.name),
        pokemon.id
    );

    html.push_str("<div class=\"pokemon-types\">\n");
    for slot in &pokemon.types {
        let _ = writeln!(
            html,
            "<span class=\"pokemon-type\">{}</span>",
            escape(&display_name(&slot.kind.name))
        );
    }
    html.push_str("</div>\n<table class=\"pokemon-stats\">\n");

    for slot in &pokemon.stats {
        let _ = writeln!(
            html,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape(&display_name(&slot.stat.name)),
            slot.base_stat
        );
    }
    html.push_str("</table>\n</section>\n");
    html
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{NamedResource, StatSlot, TypeSlot};

    fn view() -> PokemonView {
        PokemonView {
            name: "Mr Mime".into(),
            id: 122,
            stats: vec![StatSlot {
                base_stat: 100,
                effort: 0,
                stat: NamedResource {
                    name: "special-attack".into(),
                    url: String::new(),
                },
            }],
            types: vec![TypeSlot {
                slot: 1,
                kind: NamedResource {
                    name: "psychic".into(),
                    url: String::new(),
                },
            }],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_index_page_with_random() {
        let html = index_page(Some(&view()), &[]);
        assert!(html.contains("Mr Mime"));
        assert!(html.contains("#122"));
        assert!(html.contains("<span class=\"pokemon-type\">Psychic</span>"));
        assert!(html.contains("Special Attack"));
        assert!(html.contains("action=\"/\""));
    }

    #[test]
    fn test_index_page_without_random() {
        let html = index_page(None, &["Pokemon not found!".to_string()]);
        assert!(html.contains("no-example"));
        assert!(html.contains("<div class=\"flash-message\">Pokemon not found!</div>"));
    }

    #[test]
    fn test_notices_are_escaped() {
        let html = error_page(&["<script>alert(1)</script>".to_string()]);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_search_page_posts_to_search() {
        let html = search_page(&view(), &[]);
        assert!(html.contains("action=\"/pokemon\""));
        assert!(html.contains("<title>Mr Mime | Pokedex</title>"));
    }

    #[test]
    fn test_main_js_embedded() {
        assert!(MAIN_JS.contains("flash-message"));
        assert!(MAIN_JS.contains("pokemon-type"));
    }
}
