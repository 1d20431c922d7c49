use car_service::config::Command;
use car_service::utils::logger;
use car_service::{
    build_backend, CarRecord, CarService, CliConfig, ErrorCategory, ServiceError, TracedCarService,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            // 日誌尚未初始化，直接輸出
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting car-service with {} backend", config.backend.kind);
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let backend = build_backend(&config.backend)?;
    let service = TracedCarService::new(backend, config.backend.kind.to_string());

    if let Err(e) = run(&service, cli.command).await {
        tracing::error!(
            "❌ Command failed: {} (status {}, category {:?}): {}",
            e,
            e.status(),
            e.category(),
            e.original_message()
        );
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.category() {
            ErrorCategory::InvalidRequest => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Conflict => 4,
            ErrorCategory::Backend | ErrorCategory::Unknown => 1,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run<S: CarService>(service: &S, command: Command) -> Result<(), ServiceError> {
    match command {
        Command::List => {
            let cars = service.get_all_cars().await?;
            print_json(&cars)?;
        }
        Command::Get { id } => {
            let car = service.get_one_car(&id).await?;
            print_json(&car)?;
        }
        Command::Create(args) => {
            service.create_car(CarRecord::from(args)).await?;
            println!("✅ Car created");
        }
        Command::Update { id, car } => {
            service.update_car(CarRecord::from(car).with_id(id.clone())).await?;
            println!("✅ Car {} updated", id);
        }
        Command::Delete { id } => {
            service.delete_car(&id).await?;
            println!("✅ Car {} deleted", id);
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), ServiceError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ServiceError::internal("could not render output", e.to_string()))?;
    println!("{}", json);
    Ok(())
}
