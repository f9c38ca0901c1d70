//! Terminal renditions of the form status indicators.

/// Shown for the duration of the attempt.
pub fn show_loading() {
    println!("Sending...");
}

pub fn show_sent(message: Option<&str>) {
    match message {
        Some(m) => println!("Your message has been sent. Thank you!\n{}", m),
        None => println!("Your message has been sent. Thank you!"),
    }
}

/// Error text goes to stderr, one terminal line per embedded newline.
pub fn show_error(error: &str) {
    for line in error.split('\n') {
        eprintln!("{}", line);
    }

    log::error!("Form submission error: {}", error);
}
