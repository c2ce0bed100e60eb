use company_scout::{configuration::get_configuration, startup::run};
use env_logger::{Env, Target};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The credential usually lives in .env
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let configuration = get_configuration()?;

    run(configuration).await?;

    Ok(())
}
