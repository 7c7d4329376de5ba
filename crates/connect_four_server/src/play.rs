//! Local hot-seat game driven through the registry.

use anyhow::{Context, Result};
use connect_four::{COLS, MoveOutcome};
use connect_four_server::SessionRegistry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// Plays games on stdin/stdout until the input ends or a player quits.
#[instrument(skip(registry))]
pub async fn run(registry: SessionRegistry) -> Result<()> {
    let (id, view) = registry.create()?;
    debug!(game_id = %id, "Local game created");
    println!("Game {id}\n\n{}\n", view.grid());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let view = registry.view(&id).await?;
        println!("{} to move (column 0-{}, q to quit):", view.to_move(), COLS - 1);

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            return Ok(());
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let Ok(column) = input.parse::<isize>() else {
            println!("Not a column number: {input}");
            continue;
        };

        match registry.apply_move_and_store(&id, column, *view.to_move()).await {
            Ok((MoveOutcome::NoWinnerYet, view)) => println!("\n{}\n", view.grid()),
            Ok((MoveOutcome::Won { winner, final_grid }, _)) => {
                println!("\n{final_grid}\n\n{winner} wins! New game.\n");
            }
            Ok((MoveOutcome::Drawn { final_grid }, _)) => {
                println!("\n{final_grid}\n\nDraw! New game.\n");
            }
            Err(e) => println!("{e}"),
        }
    }
}
