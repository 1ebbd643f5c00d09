// viewlingo-api - main.rs
// The thin proxy backend: /api/chat and /api/tts.

use log::info;

use viewlingo::api::ApiServer;
use viewlingo::config::ServerConfig;

pub fn main() -> Result<(), String> {
    env_logger::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            eprintln!("required: OPENAI_API_KEY, ELEVENLABS_API_KEY");
            return Err(e.to_string());
        }
    };

    info!(
        "starting viewlingo api (chat model {}, voice {})",
        config.chat_model, config.tts_voice_id
    );

    let server = ApiServer::bind(&config)?;
    server.run();
    Ok(())
}
