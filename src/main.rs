use whoosh::error::DemoError;

fn main() -> Result<(), DemoError> {
    whoosh::window::run()
}
