use eventcast::{config::get_or_init_announcer_config, App, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        eventcast::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        eventcast::init_dbg_tracing();
    }

    let config = get_or_init_announcer_config().clone();
    let app = App::build_announcer(config).await?;

    eventcast::serve(app).await?;

    Ok(())
}
