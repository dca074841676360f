use crate::upload::Status;

/// Show an upload outcome: successes on stdout, errors on stderr.
pub fn notify(label: &str, status: &Status) {
    match status {
        Status::Success(msg) => println!("{}", format_message(label, msg)),
        Status::Error(msg) => eprintln!("{}", format_message(label, msg)),
    }
}

/// Label on its own line, then the message verbatim with each line indented.
pub fn format_message(label: &str, text: &str) -> String {
    let mut out = String::from(label);
    for line in text.lines() {
        out.push_str("\n  ");
        out.push_str(line);
    }
    out
}
