#[tokio::main]
async fn main() -> std::process::ExitCode {
    storycase_lib::run().await
}
