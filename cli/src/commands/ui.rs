use console::Style;

pub fn print_header(title: &str) {
    println!("\n{}", Style::new().bold().cyan().apply_to(title));
    println!("{}", Style::new().dim().apply_to("─".repeat(title.chars().count())));
}

pub fn print_metric(label: &str, value: f64) {
    println!("{} {:.4}", Style::new().bold().apply_to(format!("{}:", label)), value);
}

pub fn print_elapsed(seconds: f64) {
    println!("{}", Style::new().dim().apply_to(format!("Elapsed: {:.2}s", seconds)));
}

pub fn print_written(path: &std::path::Path) {
    println!("{} {}", Style::new().green().apply_to("Wrote"), path.display());
}
