fn main() -> std::process::ExitCode {
    store_migrate_lib::run()
}
