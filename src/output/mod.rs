//! Output formatting for CLI display
//!
//! Renders recipes the way the list view's cards do: title, a coloured
//! difficulty badge and the first two tags, with a `+N` for the rest.
//! Also writes JSON and CSV exports.

use crate::pipeline::PageView;
use crate::recipe::{Difficulty, Recipe};
use crate::session::{Notice, NoticeLevel};
use colored::Colorize;
use std::io;

/// Tags shown inline before collapsing into `+N`
const INLINE_TAGS: usize = 2;

/// Uppercase difficulty badge, green / yellow / red
#[must_use]
pub fn difficulty_badge(difficulty: Difficulty) -> String {
    let label = difficulty.as_str().to_uppercase();
    match difficulty {
        Difficulty::Easy => label.green().to_string(),
        Difficulty::Medium => label.yellow().to_string(),
        Difficulty::Hard => label.red().to_string(),
    }
}

/// First tags of a recipe, with a count of the hidden ones
#[must_use]
pub fn tag_summary(tags: &[String]) -> String {
    let shown = tags
        .iter()
        .take(INLINE_TAGS)
        .map(|t| t.blue().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if tags.len() > INLINE_TAGS {
        format!("{shown} +{}", tags.len() - INLINE_TAGS)
    } else {
        shown
    }
}

/// One list row
///
/// `slot` is the position on the visible page, the index `move` expects.
/// In quiet mode the row is just `id<TAB>title`.
#[must_use]
pub fn recipe_line(recipe: &Recipe, slot: usize, selected: bool, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", recipe.id, recipe.title);
    }
    let marker = if selected { "[✓]".green().to_string() } else { "[ ]".to_string() };
    let tags = tag_summary(&recipe.tags);
    let mut line = format!(
        "{slot:>2} {marker} {} {} {}",
        format!("#{}", recipe.id).dimmed(),
        recipe.title.bold(),
        difficulty_badge(recipe.difficulty)
    );
    if !tags.is_empty() {
        line.push(' ');
        line.push_str(&tags);
    }
    line
}

/// Full multi-line view of one recipe
#[must_use]
pub fn recipe_detail(recipe: &Recipe) -> String {
    let mut out = format!(
        "{} {}\n{}\n",
        recipe.title.bold(),
        difficulty_badge(recipe.difficulty),
        recipe.description
    );
    if !recipe.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", recipe.tags.join(", ")));
    }
    if !recipe.ingredients.is_empty() {
        out.push_str(&format!("\n{}\n", "Ingredients".underline()));
        for ingredient in &recipe.ingredients {
            out.push_str(&format!("  • {ingredient}\n"));
        }
    }
    if !recipe.instructions.is_empty() {
        out.push_str(&format!("\n{}\n", "Instructions".underline()));
        for (n, step) in recipe.instructions.iter().enumerate() {
            out.push_str(&format!("  {}. {step}\n", n + 1));
        }
    }
    if let Some(created) = recipe.created() {
        out.push_str(&format!("\n{}", format!("Created {}", created.format("%Y-%m-%d")).dimmed()));
    }
    out
}

/// Pagination footer
#[must_use]
pub fn page_footer(view: &PageView<'_>) -> String {
    if view.total_matches == 0 {
        return "No recipes found".dimmed().to_string();
    }
    let mut footer = format!(
        "Page {} of {} ({} recipe(s))",
        view.page, view.total_pages, view.total_matches
    );
    if view.has_previous() {
        footer.push_str(&format!(" · previous: --page {}", view.page - 1));
    }
    if view.has_next() {
        footer.push_str(&format!(" · next: --page {}", view.page + 1));
    }
    footer.dimmed().to_string()
}

/// Print a notice with the usual ✓ / ❌ prefix
pub fn print_notice(notice: &Notice, quiet: bool) {
    match notice.level {
        NoticeLevel::Success if !quiet => println!("{} {}", "✓".green(), notice.message),
        NoticeLevel::Success => {}
        NoticeLevel::Error => eprintln!("{} {}", "❌".red(), notice.message),
    }
}

/// Write recipes as a pretty JSON array
///
/// # Errors
///
/// Returns `io::Error` if writing fails.
pub fn write_json<W: io::Write>(mut writer: W, recipes: &[&Recipe]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, recipes)?;
    writeln!(writer)
}

/// Write recipes as CSV with one row per recipe
///
/// List fields are joined with `; `.
///
/// # Errors
///
/// Returns `csv::Error` if writing fails.
pub fn write_csv<W: io::Write>(writer: W, recipes: &[&Recipe]) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "id",
        "title",
        "description",
        "difficulty",
        "tags",
        "ingredients",
        "instructions",
        "created_at",
        "order",
    ])?;
    for recipe in recipes {
        csv.write_record([
            recipe.id.to_string(),
            recipe.title.clone(),
            recipe.description.clone(),
            recipe.difficulty.to_string(),
            recipe.tags.join("; "),
            recipe.ingredients.join("; "),
            recipe.instructions.join("; "),
            recipe.created().map(|d| d.to_rfc3339()).unwrap_or_default(),
            recipe.order.map(|o| o.to_string()).unwrap_or_default(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecipeBuilder;

    #[test]
    fn test_tag_summary_collapses_extra_tags() {
        let tags: Vec<String> = ["Soup", "Vegan", "Lunch", "Dinner"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let summary = tag_summary(&tags);
        assert!(summary.contains("Soup"));
        assert!(summary.contains("Vegan"));
        assert!(!summary.contains("Lunch"));
        assert!(summary.ends_with("+2"));
        assert_eq!(tag_summary(&[]), "");
    }

    #[test]
    fn test_difficulty_badge_is_uppercase() {
        assert!(difficulty_badge(Difficulty::Medium).contains("MEDIUM"));
    }

    #[test]
    fn test_recipe_line_quiet() {
        let recipe = RecipeBuilder::new(4, "Miso Soup").build();
        assert_eq!(recipe_line(&recipe, 0, false, true), "4\tMiso Soup");
    }

    #[test]
    fn test_recipe_detail_numbers_steps() {
        let mut recipe = RecipeBuilder::new(1, "Tea").build();
        recipe.instructions = vec!["Boil".into(), "Steep".into()];
        let detail = recipe_detail(&recipe);
        assert!(detail.contains("1. Boil"));
        assert!(detail.contains("2. Steep"));
    }

    #[test]
    fn test_write_csv() {
        let recipe = RecipeBuilder::new(7, "Salad, Green")
            .tags(&["Salad", "Vegan"])
            .order(2)
            .build();
        let mut out = Vec::new();
        write_csv(&mut out, &[&recipe]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("id,title,"));
        assert_eq!(
            lines.next().unwrap(),
            "7,\"Salad, Green\",,easy,Salad; Vegan,,,,2"
        );
    }

    #[test]
    fn test_write_json() {
        let recipe = RecipeBuilder::new(1, "Tea").build();
        let mut out = Vec::new();
        write_json(&mut out, &[&recipe]).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["title"], "Tea");
    }
}
