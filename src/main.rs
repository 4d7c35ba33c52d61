//! Deck UI Entry Point

fn main() {
    console_error_panic_hook::set_once();
    deck_ui::app::boot();
}
