use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use tocspy_parser::{MarkdownParser, ParsedDocument};
use tocspy_ui::TableOfContents;

const GETTING_STARTED: &str = include_str!("../content/getting-started.md");
const CHANGELOG: &str = include_str!("../content/changelog.md");

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
      <Title text="tocspy demo" />

      <Router>
        <main>
          <Routes fallback=|| "Page not found.".into_view()>
            <Route path=StaticSegment("") view=ArticlePage />
          </Routes>
        </main>
      </Router>
    }
}

/// Renders an article next to its table of contents.
#[component]
fn ArticlePage() -> impl IntoView {
    let parser = MarkdownParser::new();
    let articles = StoredValue::new([parser.parse(GETTING_STARTED), parser.parse(CHANGELOG)]);
    let selected = RwSignal::new(0usize);

    let document = Memo::new(move |_| articles.with_value(|a| a[selected.get()].clone()));
    let tree = Signal::derive(move || document.with(|d| d.headings.clone()));
    let html = move || document.with(|d: &ParsedDocument| d.html.clone());

    view! {
      <div class="layout">
        <aside class="sidebar">
          <TableOfContents tree=tree />
        </aside>
        <section class="content">
          <button on:click=move |_| selected.update(|i| *i = (*i + 1) % 2)>"Next article"</button>
          <article inner_html=html></article>
        </section>
      </div>
    }
}
