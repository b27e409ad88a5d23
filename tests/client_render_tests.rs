use boa_engine::{Context, Source};
use link_media_crawler::page::INDEX_HTML;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::{Value, json};

/// Stand-ins for the three result containers. `insertAdjacentHTML` appends,
/// so a render that forgot to clear would accumulate items.
const FAKE_VIEW: &str = r#"
    function fakeContainer() {
        return {
            html: '',
            get innerHTML() { return this.html; },
            set innerHTML(value) { this.html = value; },
            insertAdjacentHTML: function (position, markup) { this.html += markup; }
        };
    }
    var view = {
        internal: fakeContainer(),
        external: fakeContainer(),
        media: fakeContainer(),
        results: { style: { display: 'none' } }
    };
    function snapshot() {
        return JSON.stringify({
            internal: view.internal.innerHTML,
            external: view.external.innerHTML,
            media: view.media.innerHTML,
            results: view.results.style.display
        });
    }
"#;

#[derive(Debug, Deserialize, PartialEq)]
struct Snapshot {
    internal: String,
    external: String,
    media: String,
    results: String,
}

fn view_script() -> String {
    let document = Html::parse_document(INDEX_HTML);
    let selector = Selector::parse("script#crawl-view").unwrap();
    document
        .select(&selector)
        .next()
        .expect("page carries the render script")
        .text()
        .collect()
}

fn page_context() -> Context {
    let mut context = Context::default();
    context.eval(Source::from_bytes(&view_script())).unwrap();
    context.eval(Source::from_bytes(FAKE_VIEW)).unwrap();
    context
}

fn render(context: &mut Context, envelope: &Value) -> Snapshot {
    let script = format!("CrawlView.render(view, {}); snapshot()", envelope);
    let value = context.eval(Source::from_bytes(&script)).unwrap();
    let json = value.to_string(context).unwrap().to_std_string_escaped();
    serde_json::from_str(&json).unwrap()
}

fn hrefs(markup: &str, selector: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(markup);
    let selector = Selector::parse(selector).unwrap();
    fragment
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

fn envelope() -> Value {
    json!({
        "links": {
            "internal": [
                {"href": "https://a.test/one", "text": "One", "title": null},
                {"href": "https://a.test/two", "text": null, "title": "Two"},
                {"href": "https://a.test/three", "text": "Three", "title": "3"}
            ],
            "external": [
                {"href": "https://b.test/", "text": "B", "title": null},
                {"href": "https://c.test/", "text": "C", "title": null}
            ]
        },
        "media": {
            "images": [
                {"src": "https://a.test/1.png", "alt": "first"},
                {"src": "https://a.test/2.png", "alt": null},
                {"src": "https://a.test/3.png", "alt": "third"},
                {"src": "https://a.test/4.png", "alt": null}
            ]
        }
    })
}

#[test]
fn renders_one_item_per_record_in_order() {
    let mut context = page_context();
    let snapshot = render(&mut context, &envelope());

    assert_eq!(
        hrefs(&snapshot.internal, "li.link-item > a"),
        vec!["https://a.test/one", "https://a.test/two", "https://a.test/three"]
    );
    assert_eq!(
        hrefs(&snapshot.external, "li.link-item > a"),
        vec!["https://b.test/", "https://c.test/"]
    );
    assert_eq!(
        hrefs(&snapshot.media, "div.media-item > a"),
        vec![
            "https://a.test/1.png",
            "https://a.test/2.png",
            "https://a.test/3.png",
            "https://a.test/4.png"
        ]
    );
    assert_eq!(snapshot.results, "block");
}

#[test]
fn rendering_twice_leaves_the_same_content() {
    let mut context = page_context();
    let first = render(&mut context, &envelope());
    let second = render(&mut context, &envelope());

    assert_eq!(first, second);
    assert_eq!(hrefs(&second.internal, "li.link-item > a").len(), 3);
    assert_eq!(hrefs(&second.external, "li.link-item > a").len(), 2);
    assert_eq!(hrefs(&second.media, "div.media-item > a").len(), 4);
}

#[test]
fn a_new_result_replaces_the_previous_one() {
    let mut context = page_context();
    render(&mut context, &envelope());

    let smaller = json!({
        "links": {
            "internal": [],
            "external": [{"href": "https://d.test/", "text": "D", "title": null}]
        },
        "media": {"images": []}
    });
    let snapshot = render(&mut context, &smaller);

    assert!(hrefs(&snapshot.internal, "li.link-item > a").is_empty());
    assert_eq!(hrefs(&snapshot.external, "li.link-item > a"), vec!["https://d.test/"]);
    assert!(hrefs(&snapshot.media, "div.media-item > a").is_empty());
}

#[test]
fn missing_fields_show_placeholder_and_markup_is_escaped() {
    let mut context = page_context();
    let hostile = json!({
        "links": {
            "internal": [{"href": "https://a.test/?q=\"x\"", "text": "<b>bold</b>", "title": null}],
            "external": []
        },
        "media": {"images": [{"src": "https://a.test/i.png", "alt": null}]}
    });
    let snapshot = render(&mut context, &hostile);

    assert!(snapshot.internal.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(snapshot.internal.contains("<strong>Title:</strong> N/A"));
    assert_eq!(
        hrefs(&snapshot.internal, "li.link-item > a"),
        vec!["https://a.test/?q=\"x\""]
    );
    assert!(snapshot.media.contains("<strong>Alt Text:</strong> N/A"));
}
