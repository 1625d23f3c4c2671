//! Embed URL and player descriptor example
//!
//! Shows the descriptor handed to `YT.Player` and the equivalent plain
//! `<iframe>` URL for the same settings.
//!
//! Run with: cargo run -p ytframe-core --example embed_url

use ytframe_core::{
    AnnotationPolicy, ListType, PlayerConfig, PlayerErrorCode, PlayerState, PlayerVars,
    ProgressColor,
};

fn main() -> ytframe_core::Result<()> {
    println!("ytframe Core - Embed Example");
    println!("============================\n");

    let config = PlayerConfig::new("M7lc1UVf-VE")
        .with_size("640", "390")
        .with_vars(PlayerVars {
            autoplay: Some(false),
            color: Some(ProgressColor::White),
            iv_load_policy: Some(AnnotationPolicy::Hide),
            start: Some(10),
            end: Some(95),
            ..PlayerVars::api_controlled("https://example.com")
        });
    config.validate()?;

    println!("Constructor descriptor:");
    println!("-----------------------");
    println!("  {}", config.to_json()?);
    println!();

    println!("Plain iframe src:");
    println!("-----------------");
    println!("  {}", config.embed_url()?);
    println!();

    let playlist = PlayerConfig::default().with_vars(PlayerVars {
        list: Some("PLC77007E23FF423C6".into()),
        list_type: Some(ListType::Playlist),
        ..Default::default()
    });
    println!("Playlist embed:");
    println!("---------------");
    println!("  {}", playlist.embed_url()?);
    println!();

    println!("Player states:");
    println!("--------------");
    for state in PlayerState::ALL {
        println!("  {:>2}  YT.PlayerState.{:<10} {}", state.code(), state.constant_name(), state);
    }
    println!();

    println!("Error codes:");
    println!("------------");
    for code in [2, 5, 100, 101, 150] {
        if let Some(error) = PlayerErrorCode::from_code(code) {
            println!("  {error}");
        }
    }

    Ok(())
}
