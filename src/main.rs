fn main() -> std::process::ExitCode {
    mc_launcher::run()
}
