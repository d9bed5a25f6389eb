use tokio::sync::{mpsc, watch};

use elevatorsim::config;
use elevatorsim::elevator_logic::controller::ElevatorController;
use elevatorsim::elevator_logic::scheduler::Scheduler;
use elevatorsim::init;
use elevatorsim::print;
use elevatorsim::runner::{self, Command, Simulation};


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Argumenta på formen "cargo r -- floors::8 mode::scan"
    let startup = init::parse_args()?;
    if startup.show_help {
        init::print_usage();
        runner::print_commands();
        return Ok(());
    }

    let controller = ElevatorController::new(startup.config, Scheduler::from(startup.scheduler));
    print::info(format!(
        "Starter simulator: {} etasjar, {} scheduler, {} etg/s",
        controller.floor_count(),
        controller.scheduler_name(),
        controller.config().speed_fps,
    ));
    print::info("Skriv 'help' for kommandoar".to_string());

    /* START ----------- Init av channels mellom stdin og tick-loopen ---------------------- */
    let (command_tx, command_rx) = mpsc::channel::<Command>(config::COMMAND_CHANNEL_SIZE);
    let sim = Simulation::new(controller);
    let (snapshot_tx, snapshot_rx) = watch::channel(sim.snapshot());
    /* SLUTT ----------- Init av channels mellom stdin og tick-loopen ---------------------- */

    // Task som les kommandoar frå stdin
    {
        let snapshot_rx = snapshot_rx.clone();
        let _reader_task = tokio::spawn(async move {
            if let Err(e) = runner::read_commands(command_tx, snapshot_rx).await {
                print::err(format!("Command reader stopped: {:#}", e));
            }
        });
    }

    // Task som eig kontrolleren og tikkar simuleringa
    let sim_task = tokio::spawn(async move {
        runner::run_simulation(sim, command_rx, snapshot_tx).await
    });

    let last = sim_task.await?;
    print::status(&last);
    print::ok("Simulator avslutta".to_string());
    Ok(())
}
