mod cli;

use std::path::Path;

use anyhow::{bail, Context, Error, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use u_cpu_sched::gantt;
use u_cpu_sched::models::{Process, Ticks, Timeline};
use u_cpu_sched::scheduler::{
    self, AverageDivisor, NonPreemptiveSjf, RoundRobin, ScheduleKpi, Scheduler,
};
use u_cpu_sched::validation::{validate_with_options, ValidationOptions};
use u_cpu_sched::workload::{Workload, WorkloadGenerator};
use u_cpu_sched::ScheduleError;

use cli::{Cli, Command, InputArgs, RoundRobinArgs};

#[derive(Serialize)]
struct Report<'a> {
    scheduler: &'a str,
    kpi: &'a ScheduleKpi,
    timeline: &'a Timeline,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_processes(input: &InputArgs) -> Result<(Workload, Vec<Process>)> {
    let workload = Workload::load(&input.input)
        .with_context(|| format!("loading workload {}", input.input.display()))?;
    let processes = workload.to_processes();

    if input.reference_limits {
        validate_with_options(&processes, &ValidationOptions::reference())
            .map_err(ScheduleError::from)?;
    }

    Ok((workload, processes))
}

fn round_robin(workload: &Workload, args: &RoundRobinArgs) -> Result<RoundRobin> {
    let Some(quantum) = args.quantum.or(workload.quantum) else {
        bail!("no quantum: pass --quantum or set \"quantum\" in the workload");
    };
    let divisor = if args.per_process_average {
        AverageDivisor::ProcessCount
    } else {
        scheduler::ROUND_ROBIN_AVERAGE_DIVISOR
    };
    Ok(RoundRobin::new(quantum).with_average_divisor(divisor))
}

fn fmt_avg(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| format!("{v:.2}"))
}

fn print_text(name: &str, kpi: &ScheduleKpi, timeline: &Timeline) {
    println!("== {name} ==");
    println!(
        "{:<8}{:>8}{:>8}{:>10}{:>11}{:>12}{:>9}",
        "Process", "Arrival", "Burst", "Priority", "Finishing", "Turnaround", "Waiting"
    );
    for m in &kpi.per_process {
        println!(
            "{:<8}{:>8}{:>8}{:>10}{:>11}{:>12}{:>9}",
            format!("P{}", m.id),
            m.arrival_time,
            m.burst_time,
            m.priority,
            m.finishing_time,
            m.turnaround_time,
            m.waiting_time
        );
    }
    println!();
    println!("Average Turnaround Time: {}", fmt_avg(kpi.avg_turnaround_time));
    println!("Average Waiting Time: {}", fmt_avg(kpi.avg_waiting_time));
    println!("Average Response Time: {}", fmt_avg(kpi.avg_response_time));
    println!("CPU Utilization: {}", fmt_avg(kpi.utilization.map(|u| u * 100.0)));
    println!();
    println!("Gantt Chart:");
    println!("{}", gantt::render(timeline));
    println!("Dispatch Order: {}", gantt::render_sequence(timeline));
    println!("Time Markers: {}", gantt::render_markers(timeline));
    println!();
}

fn run(scheduler: &dyn Scheduler, processes: &[Process], json: bool) -> Result<()> {
    let outcome = scheduler.schedule(processes)?;
    let kpi = outcome.kpi();

    if json {
        let report = Report {
            scheduler: scheduler.name(),
            kpi: &kpi,
            timeline: &outcome.timeline,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(scheduler.name(), &kpi, &outcome.timeline);
    }
    Ok(())
}

fn generate(seed: u64, count: usize, quantum: Option<Ticks>, output: Option<&Path>) -> Result<()> {
    let mut workload = WorkloadGenerator::new(seed).with_count(count).generate_workload();
    workload.quantum = quantum;

    match output {
        Some(path) => workload
            .save(path)
            .with_context(|| format!("writing workload {}", path.display()))?,
        None => println!("{}", workload.to_json_pretty()?),
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let opts = Cli::parse();
    init_logging(opts.verbose);

    match &opts.command {
        Command::Sjf { input } => {
            let (_, processes) = load_processes(input)?;
            run(&NonPreemptiveSjf::new(), &processes, opts.json)
        }
        Command::Rr { input, rr } => {
            let (workload, processes) = load_processes(input)?;
            run(&round_robin(&workload, rr)?, &processes, opts.json)
        }
        Command::Compare { input, rr } => {
            let (workload, processes) = load_processes(input)?;
            let sjf = NonPreemptiveSjf::new();
            let rr = round_robin(&workload, rr)?;
            let schedulers: [&dyn Scheduler; 2] = [&sjf, &rr];
            let rows = scheduler::compare(&processes, &schedulers)?;

            if opts.json {
                let reports: Vec<Report<'_>> = rows
                    .iter()
                    .map(|r| Report {
                        scheduler: r.name,
                        kpi: &r.kpi,
                        timeline: &r.outcome.timeline,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for r in &rows {
                    print_text(r.name, &r.kpi, &r.outcome.timeline);
                }
            }
            Ok(())
        }
        Command::Generate {
            seed,
            count,
            quantum,
            output,
        } => generate(*seed, *count, *quantum, output.as_deref()),
    }
}
