//! shiftclock main entrypoint.

use shiftclock::run;

fn main() {
    if let Err(e) = run() {
        shiftclock::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
