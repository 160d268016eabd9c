//! Console output helpers for the interactive menu.

use colored::Colorize;

pub fn print_banner() {
    println!();
    println!("{}", "🚀 Welcome to ToDo List Manager!".cyan().bold());
    println!("{}", "📝 Manage your projects and tasks efficiently".bright_black());
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", "═".repeat(60).bright_black());
    println!("{}", title.cyan().bold());
    println!("{}", "═".repeat(60).bright_black());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

pub fn print_error(message: &str) {
    println!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

pub fn print_separator() {
    println!("{}", "─".repeat(60).bright_black());
}
