//! Document assembly for initial page loads.

use std::path::Path;

use super::dom::{Element, Node};
use super::shell::DocumentShell;
use super::Page;
use crate::config::AppConfig;
use crate::resources::{is_remote_location, HttpResource, ResourceResolver};

const VIEWPORT: &str =
    "width=device-width, initial-scale=1, maximum-scale=1, user-scalable=0, viewport-fit=cover";

/// Absolute URL for OpenGraph/twitter metadata.
///
/// Remote URLs are kept; local paths are made absolute with `domain` when
/// one is configured.
pub fn resolve_og_resource(domain: &str, path: &str) -> String {
    if path.is_empty() || domain.is_empty() || is_remote_location(path) {
        return path.to_string();
    }
    format!("https://{}/{}", domain.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn meta_name(name: &str, content: impl Into<String>) -> Element {
    Element::new("meta").attr("name", name).attr("content", content)
}

fn meta_property(property: &str, content: impl Into<String>) -> Element {
    Element::new("meta").attr("property", property).attr("content", content)
}

fn parsed(values: &[String]) -> impl Iterator<Item = HttpResource> + '_ {
    values
        .iter()
        .map(|v| HttpResource::parse(v))
        .filter(|r| !r.url.is_empty())
}

fn font_type(url: &str) -> String {
    let ext = Path::new(url)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    format!("font/{}", ext)
}

/// Build the page document.
pub fn render_page(
    config: &AppConfig,
    page: &Page,
    resolver: &dyn ResourceResolver,
    shell: &dyn DocumentShell,
) -> Element {
    let domain = config.domain.as_str();
    let icon = if config.icon.svg.is_empty() {
        &config.icon.default
    } else {
        &config.icon.svg
    };

    let mut head = Element::new("head")
        .child(Element::new("meta").attr("charset", "UTF-8"))
        .child(meta_name("author", page.author.as_str()))
        .child(meta_name("description", page.description.as_str()));
    if !page.keywords.is_empty() {
        head = head.child(meta_name("keywords", page.keywords_content()));
    }
    head = head
        .child(meta_name("theme-color", config.theme_color.as_str()))
        .child(meta_name("viewport", VIEWPORT))
        .child(meta_property(
            "og:url",
            resolve_og_resource(domain, &resolver.resolve(page.path())),
        ))
        .child(meta_property("og:title", page.title.as_str()))
        .child(meta_property("og:description", page.description.as_str()))
        .child(meta_property("og:type", "website"))
        .child(meta_property("og:image", resolve_og_resource(domain, &page.image)));

    for (name, value) in page.twitter_card() {
        if value.is_empty() {
            continue;
        }
        let value = if name == "twitter:image" {
            resolve_og_resource(domain, &value)
        } else {
            value
        };
        head = head.child(meta_name(name, value));
    }

    head = head
        .child(Element::new("title").text(page.title.as_str()))
        .children(parsed(&config.preconnect).map(|r| r.to_link().attr("rel", "preconnect")))
        .children(parsed(&config.fonts).map(|r| {
            let kind = font_type(&r.url);
            r.to_link()
                .attr("type", kind)
                .attr("rel", "preload")
                .attr("as", "font")
        }))
        .children(parsed(&config.styles).map(|r| {
            r.to_link()
                .attr("type", "text/css")
                .attr("rel", "preload")
                .attr("as", "style")
        }))
        .child(Element::new("link").attr("rel", "icon").attr("href", icon.as_str()))
        .child(
            Element::new("link")
                .attr("rel", "apple-touch-icon")
                .attr("href", config.icon.maskable.as_str()),
        )
        .child(
            Element::new("link")
                .attr("rel", "manifest")
                .attr("href", "/manifest.webmanifest"),
        )
        .children(
            parsed(&config.styles)
                .map(|r| r.to_link().attr("type", "text/css").attr("rel", "stylesheet")),
        )
        .child(Element::new("script").flag("defer").attr("src", "/wasm_exec.js"))
        .child(Element::new("script").flag("defer").attr("src", "/app.js"))
        .children(parsed(&config.scripts).map(|r| r.to_script()))
        .children(config.raw_headers.iter().map(|h| Node::Raw(h.clone())));

    let loader = Element::new("aside")
        .attr("id", "app-wasm-loader")
        .attr("class", "app-info")
        .child(
            Element::new("img")
                .attr("id", "app-wasm-loader-icon")
                .attr("class", "app-logo app-spin")
                .attr("alt", "wasm loader icon")
                .attr("src", config.icon.default.as_str()),
        )
        .child(
            Element::new("p")
                .attr("id", "app-wasm-loader-label")
                .attr("class", "app-label")
                .text(page.loading_label.as_str()),
        );

    shell
        .html(page)
        .attr("lang", page.lang.as_str())
        .child(head)
        .child(shell.body(page).child(loader))
}
