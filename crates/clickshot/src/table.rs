use clickshot_core::Region;

/// Print a formatted table of regions and their elements, one row per element
pub fn print_regions_table(regions: &[&Region]) {
    let rows: Vec<(String, String, String, String)> = regions
        .iter()
        .flat_map(|region| {
            let target = region.target().to_string();
            let elements: Vec<_> = region
                .elements()
                .map(|e| (e.name().to_string(), e.expected_rect().to_string()))
                .collect();
            if elements.is_empty() {
                vec![(
                    region.name().to_string(),
                    target,
                    "-".to_string(),
                    "-".to_string(),
                )]
            } else {
                elements
                    .into_iter()
                    .map(|(name, rect)| (region.name().to_string(), target.clone(), name, rect))
                    .collect()
            }
        })
        .collect();

    let region_width = column_width(rows.iter().map(|r| &r.0), "Region", 30);
    let target_width = column_width(rows.iter().map(|r| &r.1), "Target", 40);
    let element_width = column_width(rows.iter().map(|r| &r.2), "Element", 30);
    let rect_width = column_width(rows.iter().map(|r| &r.3), "Expected", 24);

    let border = |left: &str, mid: &str, right: &str| {
        println!(
            "{}{}{}{}{}{}{}{}{}",
            left,
            "─".repeat(region_width + 2),
            mid,
            "─".repeat(target_width + 2),
            mid,
            "─".repeat(element_width + 2),
            mid,
            "─".repeat(rect_width + 2),
            right,
        );
    };

    border("┌", "┬", "┐");
    println!(
        "│ {:<region_width$} │ {:<target_width$} │ {:<element_width$} │ {:<rect_width$} │",
        "Region", "Target", "Element", "Expected",
    );
    border("├", "┼", "┤");
    for (region, target, element, rect) in &rows {
        println!(
            "│ {:<region_width$} │ {:<target_width$} │ {:<element_width$} │ {:<rect_width$} │",
            truncate(region, region_width),
            truncate(target, target_width),
            truncate(element, element_width),
            truncate(rect, rect_width),
        );
    }
    border("└", "┴", "┘");
}

fn column_width<'a>(values: impl Iterator<Item = &'a String>, header: &str, max: usize) -> usize {
    let min = header.chars().count();
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(min)
        .clamp(min, max)
}

/// Truncate a string to a maximum display width, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
