use colored::Colorize;

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn field(name: &str, value: &str) {
    println!("  {:<12} {}", format!("{}:", name).bold(), value);
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "info:".blue().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}
