use std::error::Error;

use tileboard::runner::{Action, Options, Runner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        script: vec![Action::Reveal, Action::Select { id: 3 }],
        timeout_seconds: 5,
        ..Options::default()
    })?;
    let session = runner.run().await?;

    println!("Visible: {}", session.board.visible().len());
    println!("Remaining: {}", session.board.remainder_len());
    for record in session.board.visible().iter() {
        println!(
            "{} {} clicks={}",
            record.id, record.display_color, record.interaction_count
        );
    }

    Ok(())
}
