//! # Cantina Terminal Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Read configuration from `CANTINA_*` variables
//! 3. Load the catalog file
//! 4. Create the venue state and start the clock ticker
//! 5. Read commands from stdin until `quit` or end of input

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The actual setup is in lib.rs for better testability
    cantina_terminal::run().await
}
