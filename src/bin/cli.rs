//! RRP CLI Client
//!
//! Command-line interface for issuing single commands to a registry.

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use rrp_client::protocol::{Command, EntityKind};
use rrp_client::{Changes, ClientConfig, List, Response, RrpError, Session};
use tracing_subscriber::{fmt, EnvFilter};

/// RRP CLI
#[derive(Parser, Debug)]
#[command(name = "rrp-cli")]
#[command(about = "CLI for RRP registry servers")]
#[command(version)]
struct Args {
    /// Registry host (IPv4 address or DNS name)
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Registry port
    #[arg(short, long, default_value = "648")]
    port: u16,

    /// Per-operation timeout in seconds (0 disables)
    #[arg(short, long, default_value = "0")]
    timeout: u64,

    /// Registrar id; when set, a Session login precedes the command
    #[arg(long, requires = "password")]
    id: Option<String>,

    /// Registrar password
    #[arg(long, requires = "id")]
    password: Option<String>,

    /// Change the registrar password at login
    #[arg(long, requires = "id")]
    new_password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Entity {
    Domain,
    NameServer,
}

impl From<Entity> for EntityKind {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Domain => EntityKind::Domain,
            Entity::NameServer => EntityKind::NameServer,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check availability of a domain or name server
    Check {
        #[arg(value_enum)]
        entity: Entity,
        name: String,
    },

    /// Show registration details
    Status {
        #[arg(value_enum)]
        entity: Entity,
        name: String,
    },

    /// Delete a registration
    Delete {
        #[arg(value_enum)]
        entity: Entity,
        name: String,
    },

    /// Register a domain
    AddDomain {
        domain: String,

        /// Name server hosting the domain (repeatable)
        #[arg(short, long = "name-server")]
        name_servers: Vec<String>,

        /// Registration period in years (0 = registry default)
        #[arg(long, default_value = "0")]
        period: i32,
    },

    /// Register a name server
    AddNameServer {
        name_server: String,

        /// IP address of the name server (repeatable)
        #[arg(short, long = "ip", required = true)]
        ip_addresses: Vec<String>,
    },

    /// Update a domain's name servers and statuses
    ModifyDomain {
        domain: String,

        #[arg(long)]
        add_name_server: Vec<String>,

        /// Replacement as OLD=NEW
        #[arg(long, value_parser = parse_replacement)]
        replace_name_server: Vec<(String, String)>,

        #[arg(long)]
        delete_name_server: Vec<String>,

        #[arg(long)]
        add_status: Vec<String>,

        /// Replacement as OLD=NEW
        #[arg(long, value_parser = parse_replacement)]
        replace_status: Vec<(String, String)>,

        #[arg(long)]
        delete_status: Vec<String>,
    },

    /// Rename a name server or update its addresses
    ModifyNameServer {
        name_server: String,

        #[arg(long)]
        new_name: Option<String>,

        #[arg(long)]
        add_ip: Vec<String>,

        /// Replacement as OLD=NEW
        #[arg(long, value_parser = parse_replacement)]
        replace_ip: Vec<(String, String)>,

        #[arg(long)]
        delete_ip: Vec<String>,
    },

    /// Describe the server (protocol version by default)
    Describe { target: Option<String> },

    /// Renew a domain
    Renew {
        domain: String,

        #[arg(long, default_value = "0")]
        period: i32,

        #[arg(long, default_value = "0")]
        current_expiration_year: i32,
    },

    /// Request, approve or reject a transfer
    Transfer {
        domain: String,

        #[arg(long, conflicts_with = "reject")]
        approve: bool,

        #[arg(long)]
        reject: bool,
    },

    /// Send literal request lines; the terminator line is appended
    Raw { lines: Vec<String> },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rrp_client=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = ClientConfig::builder()
        .host(&args.host)
        .port(args.port)
        .timeout_secs(args.timeout);
    if let (Some(id), Some(password)) = (&args.id, &args.password) {
        builder = builder.credentials(id, password);
    }
    let config = builder.build();

    tracing::debug!("rrp-cli v{} -> {}:{}", rrp_client::VERSION, config.host, config.port);

    let mut session = Session::new(config);
    if let Err(e) = session.connect() {
        fail(&session, &e);
    }

    let logged_in = session.config().credentials().is_some();
    if let (Some(id), Some(password)) = (&args.id, &args.password) {
        match session.start_session(id, password, args.new_password.as_deref()) {
            Ok(response) if response.is_success() => {
                tracing::info!("Session established");
            }
            Ok(response) => {
                print_response(&response);
                process::exit(2);
            }
            Err(e) => fail(&session, &e),
        }
    }

    let result = run(&mut session, args.command);

    if logged_in {
        if let Err(e) = session.end_session() {
            tracing::warn!("Quit failed: {}", e);
        }
    }
    let _ = session.close();

    match result {
        Ok(response) => {
            print_response(&response);
            if !response.is_success() {
                process::exit(2);
            }
        }
        Err(e) => fail(&session, &e),
    }
}

/// What a subcommand sends
#[derive(Debug)]
enum Request {
    Typed(Command),
    Raw(String),
}

fn run(session: &mut Session, command: Commands) -> rrp_client::Result<Response> {
    match request_for(command) {
        Request::Typed(command) => session.execute(&command),
        Request::Raw(text) => session.send_and_receive(&text),
    }
}

fn request_for(command: Commands) -> Request {
    let command = match command {
        Commands::Check { entity, name } => Command::Check {
            entity: entity.into(),
            name,
        },
        Commands::Status { entity, name } => Command::Status {
            entity: entity.into(),
            name,
        },
        Commands::Delete { entity, name } => Command::Delete {
            entity: entity.into(),
            name,
        },
        Commands::AddDomain {
            domain,
            name_servers,
            period,
        } => Command::AddDomain {
            domain,
            name_servers: List::from(name_servers),
            period,
        },
        Commands::AddNameServer {
            name_server,
            ip_addresses,
        } => Command::AddNameServer {
            name_server,
            ip_addresses: List::from(ip_addresses),
        },
        Commands::ModifyDomain {
            domain,
            add_name_server,
            replace_name_server,
            delete_name_server,
            add_status,
            replace_status,
            delete_status,
        } => Command::ModifyDomain {
            domain,
            name_servers: changes(add_name_server, replace_name_server, delete_name_server),
            statuses: changes(add_status, replace_status, delete_status),
        },
        Commands::ModifyNameServer {
            name_server,
            new_name,
            add_ip,
            replace_ip,
            delete_ip,
        } => Command::ModifyNameServer {
            name_server,
            new_name,
            ip_addresses: changes(add_ip, replace_ip, delete_ip),
        },
        Commands::Describe { target } => Command::Describe { target },
        Commands::Renew {
            domain,
            period,
            current_expiration_year,
        } => Command::RenewDomain {
            domain,
            period,
            current_expiration_year,
        },
        Commands::Transfer {
            domain,
            approve,
            reject,
        } => Command::TransferDomain {
            domain,
            approve: match (approve, reject) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        },
        Commands::Raw { lines } => {
            let mut request = lines.join("\r\n");
            if !request.is_empty() {
                request.push_str("\r\n");
            }
            request.push_str(".\r\n");
            return Request::Raw(request);
        }
    };

    Request::Typed(command)
}

fn changes(added: Vec<String>, replaced: Vec<(String, String)>, deleted: Vec<String>) -> Changes {
    Changes {
        added: List::from(added),
        replaced: replaced.into_iter().collect(),
        deleted: List::from(deleted),
    }
}

fn print_response(response: &Response) {
    println!("{} {}", response.code, response.description);
    if let Some(attributes) = &response.attributes {
        print!("{}", attributes);
    }
}

fn fail(session: &Session, error: &RrpError) -> ! {
    eprintln!("error: {}", error);
    if let Some(description) = session.last_error_description() {
        eprintln!("({})", description);
    }
    process::exit(1);
}

fn parse_replacement(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .ok_or_else(|| format!("expected OLD=NEW, got {:?}", arg))
}
