use dairy_qa_cli::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        let code = if err.is_input_error() { 2 } else { 1 };
        std::process::exit(code);
    }
}
