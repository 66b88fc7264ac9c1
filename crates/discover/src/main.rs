fn main() -> Result<(), swipe_deck::ConfigError> {
    discover::run()
}
