//!
//! The CREATE3 deployer executable.
//!

pub(crate) mod arguments;

use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;

/// The successful exit code.
const EXIT_CODE_SUCCESS: i32 = 0;

/// The failure exit code.
const EXIT_CODE_FAILURE: i32 = 1;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    let config = arguments.validate()?;
    if !arguments.quiet {
        println!(
            "    {} {} v{} on `{}`",
            "Starting".bright_green().bold(),
            env!("CARGO_PKG_DESCRIPTION"),
            env!("CARGO_PKG_VERSION"),
            config.network,
        );
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(arguments, config))
}

///
/// Runs the deployment plan.
///
async fn run(arguments: Arguments, config: create3_deployer::Config) -> anyhow::Result<()> {
    let run_time_start = Instant::now();

    let plan = create3_deployer::Plan::from_file(arguments.plan.as_path())?;
    let network = create3_deployer::RpcNetwork::new(
        arguments.rpc_url.as_str(),
        arguments.secret_key()?,
    )?;
    let chain_id = network.chain_id().await?;
    let deployer = network.address();

    let summary = create3_deployer::Summary::new(arguments.verbose, arguments.quiet).wrap();
    let verifier: Option<Box<dyn create3_deployer::Verifier>> = match arguments
        .verify_command
        .as_deref()
    {
        Some(_) if create3_deployer::is_local_network(config.network.as_str(), Some(chain_id)) => {
            summary.lock().expect("Sync").warning(format!(
                "Block explorer verification is skipped on the local network `{}`",
                config.network
            ));
            None
        }
        Some(command) if config.verify => {
            Some(Box::new(create3_deployer::CommandVerifier::new(command)?))
        }
        _ => None,
    };

    let registry = create3_deployer::Registry::load(
        arguments.registry.clone(),
        arguments.registry_required,
    )?;
    let mut create3_deployer = create3_deployer::Create3Deployer::new(
        &network,
        config,
        registry,
        verifier,
        summary.clone(),
    );
    if !arguments.quiet {
        println!(
            "    {} {} entries from {} via {} (chain {chain_id}, balance {} wei)",
            "Deploying".bright_green().bold(),
            plan.entries.len(),
            create3_deployer::address_to_checksum(&deployer),
            create3_deployer.descriptor(),
            network.balance().await?,
        );
    }
    create3_deployer.run(&plan, deployer).await;
    drop(create3_deployer);

    let summary = create3_deployer::Summary::unwrap_arc(summary);
    print!("{summary}");
    if !arguments.quiet {
        println!(
            "    {} deploying in {}m{:02}s",
            "Finished".bright_green().bold(),
            run_time_start.elapsed().as_secs() / 60,
            run_time_start.elapsed().as_secs() % 60,
        );
    }

    if !summary.is_successful() {
        anyhow::bail!("Deployment failed");
    }

    Ok(())
}
