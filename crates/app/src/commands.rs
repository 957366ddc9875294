//! Subcommand handlers.

use std::process::ExitCode;

use bridge_application::{
    EndpointError, EndpointService, TriggerDispatcher, TriggerEvent, manual_commands,
};
use bridge_domain::{EndpointRecord, ResponseSink, validate};
use bridge_infrastructure::to_json_stable;

use crate::cli::{Command, EventArg, TokenAction};

type CommandResult = Result<ExitCode, Box<dyn std::error::Error>>;

pub async fn dispatch(command: Command, service: &EndpointService) -> CommandResult {
    match command {
        Command::List => list(service).await,
        Command::Show { id } => {
            let endpoint = service.get_endpoint(&id).await?;
            print!("{}", to_json_stable(&endpoint)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Run { id } => run(service, &id).await,
        Command::Fire { event, selection } => fire(service, event, selection).await,
        Command::Validate { id } => validate_endpoints(service, id.as_deref()).await,
        Command::Import { file, replace } => {
            let text = tokio::fs::read_to_string(&file).await?;
            import(service, &text, replace).await
        }
        Command::Export => {
            print!("{}", service.export_json().await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Commands => {
            for command in manual_commands(&service.list_endpoints().await?) {
                println!("{}\t{}", command.id, command.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Token { action } => token(service, action).await,
    }
}

async fn list(service: &EndpointService) -> CommandResult {
    for endpoint in service.list_endpoints().await? {
        let triggers: Vec<_> = endpoint.trigger.iter().map(ToString::to_string).collect();
        println!(
            "{}\t{}\t{}\t{}",
            endpoint.id,
            endpoint.method,
            endpoint.name,
            triggers.join(",")
        );
    }
    Ok(ExitCode::SUCCESS)
}

async fn run(service: &EndpointService, id: &str) -> CommandResult {
    let endpoint = service.get_endpoint(id).await?;
    let result = service.execute_endpoint(&endpoint).await;

    if result.success {
        if endpoint.insert_response_to != ResponseSink::ActiveNote {
            println!("{}", result.response.unwrap_or_default());
        }
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!("{}", result.error.as_deref().unwrap_or_default());
    Ok(if result.is_cancelled() {
        ExitCode::from(130)
    } else {
        ExitCode::FAILURE
    })
}

async fn fire(service: &EndpointService, event: EventArg, selection: String) -> CommandResult {
    let event = match event {
        EventArg::Open => TriggerEvent::NoteOpened,
        EventArg::Save => TriggerEvent::NoteSaved,
        EventArg::Selection => TriggerEvent::SelectionChanged { selection },
    };

    let results = TriggerDispatcher::new(service.clone()).dispatch(&event).await?;
    let mut failed = false;
    for (id, result) in results {
        if result.success {
            eprintln!("{id}: ok");
        } else {
            failed = true;
            eprintln!("{id}: {}", result.error.unwrap_or_default());
        }
    }
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

async fn validate_endpoints(service: &EndpointService, id: Option<&str>) -> CommandResult {
    let endpoints = match id {
        Some(id) => vec![service.get_endpoint(id).await?],
        None => service.list_endpoints().await?,
    };

    let mut invalid = 0usize;
    for endpoint in &endpoints {
        let validation = validate(endpoint);
        if validation.is_valid() {
            println!("{}: valid", endpoint.id);
        } else {
            invalid += 1;
            println!("{}: {}", endpoint.id, validation.message());
        }
    }
    Ok(if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn import(service: &EndpointService, text: &str, replace: bool) -> CommandResult {
    if replace {
        let candidates: Vec<EndpointRecord> = serde_json::from_str(text)
            .map_err(|e| EndpointError::Validation(vec![format!("Invalid JSON: {e}")]))?;
        let count = candidates.len();
        service.replace_endpoints(candidates).await?;
        eprintln!("Replaced endpoints with {count} imported");
        return Ok(ExitCode::SUCCESS);
    }

    let report = service.import_json(text).await?;
    if report.is_success() {
        eprintln!("Import successful: {} endpoint(s)", report.imported);
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "Imported {} endpoint(s) with errors: {}",
            report.imported,
            report.errors.join(", ")
        );
        Ok(ExitCode::FAILURE)
    }
}

async fn token(service: &EndpointService, action: TokenAction) -> CommandResult {
    match action {
        TokenAction::List => {
            for name in service.tokens().await?.keys() {
                println!("{name}");
            }
        }
        TokenAction::Set { name, value } => service.set_token(&name, &value).await?,
        TokenAction::Remove { name } => {
            if !service.remove_token(&name).await? {
                eprintln!("No token named {name}");
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
