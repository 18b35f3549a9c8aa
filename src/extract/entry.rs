//! Entry page parsing.
//!
//! Every check here encodes one assumption about the catalog's markup. A page
//! that breaks any of them yields a [`StructureError`] naming the entry and the
//! broken assumption; nothing is skipped or guessed.

use scraper::{ElementRef, Html, Selector};

use crate::extract::error::StructureError;
use crate::extract::section::{Relation, Section, NO_CATEGORIES};
use crate::harvest::listing::entry_id;
use crate::html::{
    element_children, next_element, tag, text, trailing_text, BOTTOM_BLOCKS, PROJECTS_CONTAINER,
    TOOLS_CONTAINER,
};
use crate::model::{Entry, EntryKind, FieldValue};

/// Labels whose links carry display text instead of echoing their target.
const LABELLED_LINK_FIELDS: [&str; 3] = ["Category", "category", "Country"];

/// Identifies the page being parsed in every error.
#[derive(Clone, Copy)]
struct Page {
    kind: EntryKind,
    id: u32,
}

impl Page {
    fn fail(self, expectation: impl Into<String>) -> StructureError {
        StructureError {
            kind: self.kind,
            id: self.id,
            expectation: expectation.into(),
        }
    }

    /// Requires `element` to exist and be a `name` element.
    fn expect<'a>(
        self,
        element: Option<ElementRef<'a>>,
        name: &str,
        context: &str,
    ) -> Result<ElementRef<'a>, StructureError> {
        match element {
            Some(el) if tag(&el) == name => Ok(el),
            Some(el) => Err(self.fail(format!(
                "expected <{name}> for {context}, found <{}>",
                tag(&el)
            ))),
            None => Err(self.fail(format!("expected <{name}> for {context}, found nothing"))),
        }
    }
}

/// Parses one cached entry page into a record.
///
/// # Errors
///
/// Returns [`StructureError`] on the first markup deviation.
pub fn parse_entry(kind: EntryKind, id: u32, html: &str) -> Result<Entry, StructureError> {
    let page = Page { kind, id };
    let document = Html::parse_document(html);

    let mut entry = base_entry(page, &document)?;

    for block in document.select(&BOTTOM_BLOCKS) {
        for h2 in element_children(block).filter(|el| tag(el) == "h2") {
            let section = Section::from_title(&text(h2));
            if !section.accepted_by(kind) {
                return Err(page.fail(format!("unknown title \"{}\"", section.title())));
            }
            apply_section(page, &mut entry, &section, h2)?;
        }
    }

    Ok(entry)
}

fn container_selector(kind: EntryKind) -> &'static Selector {
    match kind {
        EntryKind::Project | EntryKind::Reference => &*PROJECTS_CONTAINER,
        EntryKind::Tool => &*TOOLS_CONTAINER,
    }
}

/// ID, Name and Description from the kind's content container.
///
/// The container holds a name heading, an optional metadata element, and the
/// description as a bare `<div>`, in that order.
fn base_entry(page: Page, document: &Html) -> Result<Entry, StructureError> {
    let class = page.kind.container_class();
    let container = document
        .select(container_selector(page.kind))
        .next()
        .ok_or_else(|| page.fail(format!("no div.{class} container")))?;

    let children: Vec<ElementRef<'_>> = element_children(container).collect();
    if !(2..=3).contains(&children.len()) {
        return Err(page.fail(format!(
            "div.{class} has {} child elements, expected 2 or 3",
            children.len()
        )));
    }

    let h1 = page.expect(children.first().copied(), "h1", "name")?;
    let name = text(h1);
    if name.is_empty() {
        return Err(page.fail(format!("empty <h1> name in div.{class}")));
    }

    let description = page.expect(children.last().copied(), "div", "description")?;
    if description.value().attrs().next().is_some() {
        return Err(page.fail(format!("description <div> in div.{class} has attributes")));
    }
    let description = description.inner_html().trim().to_string();

    Ok(Entry::new(page.kind, page.id, name, description))
}

fn apply_section(
    page: Page,
    entry: &mut Entry,
    section: &Section,
    h2: ElementRef<'_>,
) -> Result<(), StructureError> {
    match section {
        Section::AdditionalInformation => {
            let ul = page.expect(next_element(h2), "ul", "additional information")?;
            add_additional_information(page, entry, ul)
        }
        Section::References
        | Section::RelatedProjects
        | Section::Projects
        | Section::ToolsUsed
        | Section::RelatedTools => {
            let Some(relation) = section.relation() else {
                return Err(page.fail(format!("no link layout for \"{}\"", section.title())));
            };
            let ids = relation_ids(page, h2, relation, section.title())?;
            if !ids.is_empty() {
                entry
                    .fields
                    .insert(section.title().to_string(), FieldValue::Ids(ids));
            }
            Ok(())
        }
        Section::SliceAndDice => match next_element(h2) {
            Some(ul) if tag(&ul) == "ul" => add_additional_information(page, entry, ul),
            Some(p) if tag(&p) == "p" => {
                let found = text(p);
                if found == NO_CATEGORIES {
                    Ok(())
                } else {
                    Err(page.fail(format!("unknown text \"{found}\" under Slice & Dice")))
                }
            }
            Some(other) => Err(page.fail(format!(
                "unknown tag <{}> under Slice & Dice",
                tag(&other)
            ))),
            None => Err(page.fail("nothing under Slice & Dice")),
        },
        Section::Unrecognized(title) => Err(page.fail(format!("unknown title \"{title}\""))),
    }
}

/// Label/value pairs: `<li><strong>Label</strong> value</li>` or
/// `<li><strong>Label</strong><a>..</a><a>..</a></li>`.
fn add_additional_information(
    page: Page,
    entry: &mut Entry,
    ul: ElementRef<'_>,
) -> Result<(), StructureError> {
    for li in element_children(ul) {
        if tag(&li) != "li" {
            return Err(page.fail(format!(
                "unknown tag <{}> in additional information list",
                tag(&li)
            )));
        }

        let mut children = element_children(li);
        let strong = page.expect(children.next(), "strong", "field name")?;
        let label = text(strong);
        if label.is_empty() {
            return Err(page.fail("empty field name"));
        }
        if Entry::BASE_FIELDS.contains(&label.as_str()) {
            return Err(page.fail(format!("field name \"{label}\" shadows a base field")));
        }

        let links: Vec<ElementRef<'_>> = children.collect();
        let value = if links.is_empty() {
            let value = trailing_text(strong);
            if value.is_empty() {
                FieldValue::Empty
            } else {
                FieldValue::Text(value)
            }
        } else {
            let mut values = links
                .into_iter()
                .map(|a| link_value(page, &label, a, li))
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() == 1 {
                FieldValue::Text(values.remove(0))
            } else {
                FieldValue::List(values)
            }
        };

        entry.fields.insert(label, value);
    }
    Ok(())
}

fn link_value(
    page: Page,
    label: &str,
    a: ElementRef<'_>,
    li: ElementRef<'_>,
) -> Result<String, StructureError> {
    let unknown_format = || page.fail(format!("unknown field format \"{}\"", li.html()));

    if tag(&a) != "a" {
        return Err(unknown_format());
    }
    let value = text(a);
    if LABELLED_LINK_FIELDS.contains(&label) {
        return Ok(value);
    }
    match a.value().attr("href") {
        Some(href) if href == value => Ok(value),
        _ => Err(unknown_format()),
    }
}

/// IDs of a relation section: an intro paragraph starting with
/// `relation.intro`, then a list of single-link items pointing under
/// `relation.path_prefix`.
fn relation_ids(
    page: Page,
    h2: ElementRef<'_>,
    relation: Relation,
    what: &str,
) -> Result<Vec<u32>, StructureError> {
    let p = page.expect(next_element(h2), "p", &format!("{what} intro"))?;
    let intro = text(p);
    if !intro.starts_with(relation.intro) {
        return Err(page.fail(format!("invalid text \"{intro}\" introducing {what}")));
    }
    let ul = page.expect(next_element(p), "ul", what)?;

    element_children(ul)
        .map(|li| {
            let mut links = element_children(li);
            let (Some(a), None) = (links.next(), links.next()) else {
                return Err(page.fail(format!("{what} item must hold exactly one link")));
            };
            if tag(&a) != "a" {
                return Err(page.fail(format!("unknown tag <{}> for {what} item", tag(&a))));
            }
            let href = a
                .value()
                .attr("href")
                .ok_or_else(|| page.fail(format!("{what} link without href")))?;
            if !href.starts_with(relation.path_prefix) {
                return Err(page.fail(format!(
                    "{what} link \"{href}\" is not under {}",
                    relation.path_prefix
                )));
            }
            entry_id(href).ok_or_else(|| page.fail(format!("{what} link \"{href}\" has no numeric ID")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_page(bottom: &str) -> String {
        format!(
            r#"<html><body>
            <div class="projects">
              <h1>Sample</h1>
              <div class="meta">ignored</div>
              <div>Hello <em>world</em></div>
            </div>
            <div class="bottomblock">{bottom}</div>
            </body></html>"#
        )
    }

    #[test]
    fn test_base_record() {
        let entry = parse_entry(EntryKind::Project, 7, &project_page("")).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.name, "Sample");
        assert_eq!(entry.description, "Hello <em>world</em>");
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_single_and_multi_value_fields() {
        let html = project_page(
            r#"<h2>Additional information</h2>
            <ul>
              <li><strong>Launched</strong> 2012</li>
              <li><strong>Status</strong></li>
              <li><strong>Website</strong><a href="http://a.org">http://a.org</a></li>
              <li><strong>Country</strong><a href="/c/fr">France</a><a href="/c/es">Spain</a></li>
            </ul>"#,
        );
        let entry = parse_entry(EntryKind::Project, 1, &html).unwrap();

        assert_eq!(entry.fields["Launched"], FieldValue::Text("2012".into()));
        assert_eq!(entry.fields["Status"], FieldValue::Empty);
        assert_eq!(entry.fields["Website"], FieldValue::Text("http://a.org".into()));
        assert_eq!(
            entry.fields["Country"],
            FieldValue::List(vec!["France".into(), "Spain".into()])
        );
        let labels: Vec<&str> = entry.fields.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Launched", "Status", "Website", "Country"]);
    }

    #[test]
    fn test_link_text_must_match_target() {
        let html = project_page(
            r#"<h2>Additional information</h2>
            <ul><li><strong>Website</strong><a href="http://a.org">Homepage</a></li></ul>"#,
        );
        let err = parse_entry(EntryKind::Project, 3, &html).unwrap_err();
        assert_eq!(err.kind, EntryKind::Project);
        assert_eq!(err.id, 3);
        assert!(err.expectation.starts_with("unknown field format"));
    }

    #[test]
    fn test_link_must_follow_field_name() {
        let html = project_page(
            r#"<h2>Additional information</h2>
            <ul><li><strong>Status</strong><em>active</em></li></ul>"#,
        );
        let err = parse_entry(EntryKind::Project, 3, &html).unwrap_err();
        assert_eq!(
            err.expectation,
            "unknown field format \"<li><strong>Status</strong><em>active</em></li>\""
        );
    }

    #[test]
    fn test_references_with_intro() {
        let html = project_page(
            r#"<h2>References</h2>
            <p>Additional information about this project</p>
            <ul>
              <li><a href="/references/4">Paper</a></li>
              <li><a href="/references/19">Book</a></li>
            </ul>"#,
        );
        let entry = parse_entry(EntryKind::Project, 1, &html).unwrap();
        assert_eq!(entry.fields["References"], FieldValue::Ids(vec![4, 19]));
    }

    #[test]
    fn test_empty_relation_list_is_omitted() {
        let html = project_page(
            r#"<h2>Tools used</h2>
            <p>A list of tools used by this project</p>
            <ul></ul>"#,
        );
        let entry = parse_entry(EntryKind::Project, 1, &html).unwrap();
        assert!(!entry.fields.contains_key("Tools used"));
    }

    #[test]
    fn test_reference_relations_keep_titles() {
        let html = r#"<html><body>
            <div class="projects"><h1>Paper</h1><div>Abstract</div></div>
            <div class="bottomblock">
              <h2>Related projects</h2>
              <p>A list of projects</p>
              <ul><li><a href="/projects/2">Two</a></li></ul>
              <h2>Related tools</h2>
              <p>A list of tools</p>
              <ul><li><a href="/tools/5">Five</a></li></ul>
            </div>
            </body></html>"#;
        let entry = parse_entry(EntryKind::Reference, 9, html).unwrap();
        assert_eq!(entry.fields["Related projects"], FieldValue::Ids(vec![2]));
        assert_eq!(entry.fields["Related tools"], FieldValue::Ids(vec![5]));
    }

    #[test]
    fn test_relation_link_outside_prefix() {
        let html = project_page(
            r#"<h2>Tools used</h2>
            <p>A list of tools used by this project</p>
            <ul><li><a href="/projects/5">Oops</a></li></ul>"#,
        );
        assert!(parse_entry(EntryKind::Project, 1, &html).is_err());
    }

    #[test]
    fn test_relation_item_without_link() {
        let html = project_page(
            r#"<h2>References</h2>
            <p>Additional information about this project</p>
            <ul><li>Plain text</li></ul>"#,
        );
        let err = parse_entry(EntryKind::Project, 1, &html).unwrap_err();
        assert!(err.expectation.contains("exactly one link"));
    }

    #[test]
    fn test_relation_list_requires_intro_paragraph() {
        let html = project_page(
            r#"<h2>References</h2><ul><li><a href="/references/4">Paper</a></li></ul>"#,
        );
        let err = parse_entry(EntryKind::Project, 1, &html).unwrap_err();
        assert_eq!(
            err.expectation,
            "expected <p> for References intro, found <ul>"
        );
    }

    #[test]
    fn test_wrong_intro_paragraph() {
        let html = project_page(
            r#"<h2>Tools used</h2><p>Something else</p><ul></ul>"#,
        );
        assert!(parse_entry(EntryKind::Project, 1, &html).is_err());
    }

    #[test]
    fn test_unrecognized_title() {
        let html = project_page("<h2>Comments</h2><ul></ul>");
        let err = parse_entry(EntryKind::Project, 5, &html).unwrap_err();
        assert_eq!(err.expectation, "unknown title \"Comments\"");
    }

    #[test]
    fn test_title_of_another_kind_is_rejected() {
        let html = project_page("<h2>Related tools</h2><ul></ul>");
        assert!(parse_entry(EntryKind::Project, 5, &html).is_err());
    }

    fn tool_page(bottom: &str) -> String {
        format!(
            r#"<html><body>
            <div class="tools"><h1>Voting Kit</h1><div>Votes</div></div>
            <div class="bottomblock">{bottom}</div>
            </body></html>"#
        )
    }

    #[test]
    fn test_slice_and_dice_tags() {
        let html = tool_page(
            r#"<h2>Slice &amp; Dice</h2>
            <ul><li><strong>category</strong><a href="/t/1">Voting</a><a href="/t/2">Polls</a></li></ul>
            <h2>Projects</h2>
            <p>A list of projects using this tool</p>
            <ul><li><a href="/projects/8">Eight</a></li></ul>"#,
        );
        let entry = parse_entry(EntryKind::Tool, 2, &html).unwrap();
        assert_eq!(
            entry.fields["category"],
            FieldValue::List(vec!["Voting".into(), "Polls".into()])
        );
        assert_eq!(entry.fields["Projects"], FieldValue::Ids(vec![8]));
    }

    #[test]
    fn test_slice_and_dice_without_categories() {
        let html = tool_page(
            r#"<h2>Slice &amp; Dice</h2><p>No categories have been assigned yet.</p>"#,
        );
        let entry = parse_entry(EntryKind::Tool, 2, &html).unwrap();
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_slice_and_dice_other_paragraph() {
        let html = tool_page(r#"<h2>Slice &amp; Dice</h2><p>Coming soon.</p>"#);
        assert!(parse_entry(EntryKind::Tool, 2, &html).is_err());
    }

    #[test]
    fn test_slice_and_dice_other_tag() {
        let html = tool_page(r#"<h2>Slice &amp; Dice</h2><table></table>"#);
        let err = parse_entry(EntryKind::Tool, 2, &html).unwrap_err();
        assert!(err.expectation.contains("<table>"));
    }

    #[test]
    fn test_two_child_container() {
        let entry = parse_entry(EntryKind::Tool, 2, &tool_page("")).unwrap();
        assert_eq!(entry.name, "Voting Kit");
        assert_eq!(entry.description, "Votes");
    }

    #[test]
    fn test_container_with_extra_children_is_rejected() {
        let html = r#"<html><body>
            <div class="projects">
              <h1>Sample</h1><div>Hello</div><div>More</div><p>x</p>
              <div class="promo">Buy now</div>
            </div>
            </body></html>"#;
        let err = parse_entry(EntryKind::Project, 7, html).unwrap_err();
        assert_eq!(
            err.expectation,
            "div.projects has 5 child elements, expected 2 or 3"
        );
    }

    #[test]
    fn test_name_heading_must_come_first() {
        let html = r#"<html><body>
            <div class="projects"><div>Hello</div><h1>Sample</h1><div>Body</div></div>
            </body></html>"#;
        let err = parse_entry(EntryKind::Project, 7, html).unwrap_err();
        assert_eq!(err.expectation, "expected <h1> for name, found <div>");
    }

    #[test]
    fn test_description_must_be_last_child() {
        let html = r#"<html><body>
            <div class="projects"><h1>Sample</h1><div>Hello</div><p>Footer</p></div>
            </body></html>"#;
        let err = parse_entry(EntryKind::Project, 7, html).unwrap_err();
        assert_eq!(err.expectation, "expected <div> for description, found <p>");
    }

    #[test]
    fn test_description_div_with_attributes_is_rejected() {
        let html = r#"<html><body>
            <div class="projects"><h1>Sample</h1><div class="promo">Buy now</div></div>
            </body></html>"#;
        let err = parse_entry(EntryKind::Project, 7, html).unwrap_err();
        assert_eq!(
            err.expectation,
            "description <div> in div.projects has attributes"
        );
    }

    #[test]
    fn test_container_class_must_match_exactly() {
        let html = r#"<html><body>
            <div class="projects wide"><h1>Sample</h1><div>Hello</div></div>
            </body></html>"#;
        let err = parse_entry(EntryKind::Project, 7, html).unwrap_err();
        assert_eq!(err.expectation, "no div.projects container");
    }

    #[test]
    fn test_missing_container() {
        let err = parse_entry(EntryKind::Tool, 4, &project_page("")).unwrap_err();
        assert_eq!(err.expectation, "no div.tools container");
    }
}
