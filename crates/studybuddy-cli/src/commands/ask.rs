//! Ask command - one question, one streamed reply.

use studybuddy_core::TutorConfig;

use super::{SessionArgs, Tutor};
use crate::console::StreamPrinter;

pub(crate) async fn run(config: &TutorConfig, args: &SessionArgs, text: &str) -> miette::Result<()> {
    let mut tutor = Tutor::start(config, args).await;

    let mut printer = StreamPrinter::new();
    tutor
        .session
        .submit(text, |partial| printer.update(partial))
        .await
        .map_err(|e| miette::miette!("{}", e))?;
    println!();

    Ok(())
}
