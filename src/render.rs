use askama::Template;

use crate::parser::Story;

#[derive(Template)]
#[template(path = "story.html")]
struct StoryTemplate<'a> {
    title: &'a str,
    feed_title: Option<&'a str>,
    published: Option<&'a str>,
    link: Option<&'a str>,
    description: Option<&'a str>,
    description_is_html: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    stories: &'a [Story],
    cache_buster: i64,
}

/// Heuristic for descriptions that already carry markup: those are embedded
/// verbatim, everything else is escaped and wrapped in a paragraph.
fn looks_like_html(text: &str) -> bool {
    text.contains('<') && text.contains('>')
}

pub fn render_story(story: &Story) -> Result<String, askama::Error> {
    let description = story.description.as_deref().map(str::trim);
    StoryTemplate {
        title: &story.title,
        feed_title: story.feed_title.as_deref(),
        published: story.published.as_deref(),
        link: story.link.as_deref(),
        description,
        description_is_html: description.map_or(false, looks_like_html),
    }
    .render()
}

/// Render the index for all written stories, in discovery order. Hrefs carry
/// a cache-busting query parameter so browsers do not serve pages from a
/// previous run.
pub fn render_index(stories: &[Story], cache_buster: i64) -> Result<String, askama::Error> {
    IndexTemplate {
        stories,
        cache_buster,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(title: &str) -> Story {
        Story {
            title: title.to_string(),
            link: None,
            description: None,
            published: None,
            feed_title: None,
            file_name: String::new(),
        }
    }

    mod story_page_tests {
        use super::*;

        #[test]
        fn test_title_is_escaped() {
            let html = render_story(&story("Q&A: <Markets> today")).unwrap();
            assert!(html.contains("Q&amp;A: &lt;Markets&gt; today"));
            assert!(!html.contains("<Markets>"));
        }

        #[test]
        fn test_link_rendered_as_anchor() {
            let mut s = story("T");
            s.link = Some("https://example.com/a?b=1&c=2".to_string());
            let html = render_story(&s).unwrap();
            assert!(html.contains(r#"<a href="https://example.com/a?b=1&amp;c=2""#));
            assert!(html.contains("Read original"));
        }

        #[test]
        fn test_optional_blocks_absent_when_fields_missing() {
            let html = render_story(&story("T")).unwrap();
            assert!(!html.contains("Read original"));
            assert!(!html.contains("Published:"));
            assert!(!html.contains("Source feed:"));
            assert!(!html.contains("story-content"));
        }

        #[test]
        fn test_published_and_feed_blocks_present() {
            let mut s = story("T");
            s.published = Some("Mon, 17 Aug 2026 12:00:00 GMT".to_string());
            s.feed_title = Some("Market & Wire".to_string());
            let html = render_story(&s).unwrap();
            assert!(html.contains("Published:"));
            assert!(html.contains("Mon, 17 Aug 2026 12:00:00 GMT"));
            assert!(html.contains("Source feed:"));
            assert!(html.contains("Market &amp; Wire"));
        }

        #[test]
        fn test_plain_description_is_escaped_and_wrapped() {
            let mut s = story("T");
            s.description = Some("fish & chips".to_string());
            let html = render_story(&s).unwrap();
            assert!(html.contains("<p>fish &amp; chips</p>"));
        }

        #[test]
        fn test_html_description_is_embedded_verbatim() {
            let mut s = story("T");
            s.description = Some("<p>Already <em>markup</em></p>".to_string());
            let html = render_story(&s).unwrap();
            assert!(html.contains("<p>Already <em>markup</em></p>"));
            assert!(!html.contains("&lt;p&gt;"));
        }

        #[test]
        fn test_round_trip_title_and_link() {
            let mut s = story("Stocks Rally");
            s.link = Some("https://example.com/stocks".to_string());
            let html = render_story(&s).unwrap();
            assert!(html.contains("<h1>Stocks Rally</h1>"));
            assert!(html.contains(r#"href="https://example.com/stocks""#));
        }
    }

    mod index_tests {
        use super::*;

        #[test]
        fn test_entries_link_to_story_files() {
            let mut first = story("Stocks Rally");
            first.file_name = "stocks-rally.html".to_string();
            let mut second = story("Stocks Rally");
            second.file_name = "stocks-rally-2.html".to_string();

            let html = render_index(&[first, second], 1_755_432_000).unwrap();

            assert!(html.contains(r#"href="stories/stocks-rally.html?v=1755432000""#));
            assert!(html.contains(r#"href="stories/stocks-rally-2.html?v=1755432000""#));
        }

        #[test]
        fn test_feed_title_suffix_when_known() {
            let mut s = story("T");
            s.file_name = "t.html".to_string();
            s.feed_title = Some("Dev Log".to_string());
            let html = render_index(std::slice::from_ref(&s), 0).unwrap();
            assert!(html.contains("Dev Log"));

            s.feed_title = None;
            let html = render_index(std::slice::from_ref(&s), 0).unwrap();
            assert!(!html.contains("Dev Log"));
        }

        #[test]
        fn test_titles_escaped_in_index() {
            let mut s = story("<b>Bold</b> & brash");
            s.file_name = "bold-brash.html".to_string();
            let html = render_index(std::slice::from_ref(&s), 0).unwrap();
            assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; brash"));
        }

        #[test]
        fn test_entries_in_given_order() {
            let mut a = story("Alpha");
            a.file_name = "alpha.html".to_string();
            let mut b = story("Beta");
            b.file_name = "beta.html".to_string();

            let html = render_index(&[a, b], 0).unwrap();

            let alpha_at = html.find("alpha.html").unwrap();
            let beta_at = html.find("beta.html").unwrap();
            assert!(alpha_at < beta_at);
        }
    }
}
