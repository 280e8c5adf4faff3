//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Reddit Image Scraper                              ║
║     No API key required                               ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(collection: &str, sort: &str, limit: usize, output_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Collection: r/{}", collection);
    println!("  Sort:       {}", sort);
    println!("  Limit:      {}", limit);
    println!("  Directory:  {}", output_dir);
    println!();
}
