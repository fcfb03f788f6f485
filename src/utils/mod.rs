use std::io::{self, Write};

pub mod fs;
pub mod path;

pub fn hide_cursor() {
    print!("\x1B[?25l");
    let _ = io::stdout().flush();
}

pub fn show_cursor() {
    print!("\x1B[?25h");
    let _ = io::stdout().flush();
}
