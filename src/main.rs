use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use devfolio::{
    AccessGate, Config, Persistence, PortfolioStore, ProjectCategory, RemoteBackend, RemoteStore,
    admin::{ContactForm, ProfileImageInput, ProjectForm},
    core::remote::{clear_projects, seed_defaults},
    open_portfolio, site,
};

#[derive(Parser)]
#[command(name = "devfolio")]
#[command(about = "Developer portfolio with a built-in content editor")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the whole portfolio page
    Show,
    /// Print the detail view of one project
    Project { id: String },
    /// Reprint the page whenever the remote store pushes a change
    Watch,
    /// Show where data is read from and whether remote sync works
    Status,
    /// Edit the portfolio content
    Admin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Answer yes to every confirmation prompt
        #[arg(long)]
        yes: bool,
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Open the desktop viewer
    #[cfg(feature = "gui")]
    Gui,
}

#[derive(Subcommand)]
enum AdminAction {
    AddProject(ProjectArgs),
    EditProject {
        id: String,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    DeleteProject {
        id: String,
    },
    SetContact {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Digits only: country code, area code, number
        #[arg(long)]
        whatsapp: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    SetImage {
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,
        /// Image file to inline as a data URI
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Wipe local data and go back to the built-in content
    Reset,
    /// Push the built-in content to the remote store
    SeedRemote,
    /// Delete every project from the remote store
    ClearRemote,
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    short_description: Option<String>,
    #[arg(long)]
    full_description: Option<String>,
    /// Comma separated
    #[arg(long)]
    technologies: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    /// Web System, Institutional, Dashboard or App
    #[arg(long)]
    category: Option<ProjectCategory>,
}

impl ProjectArgs {
    fn apply(self, form: &mut ProjectForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(short_description) = self.short_description {
            form.short_description = short_description;
        }
        if let Some(full_description) = self.full_description {
            form.full_description = full_description;
        }
        if let Some(technologies) = self.technologies {
            form.technologies = technologies;
        }
        if let Some(image_url) = self.image_url {
            form.image_url = image_url;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
    }
}

fn confirm_on_stdin(assume_yes: bool) -> impl FnOnce(&str) -> bool {
    move |prompt| {
        if assume_yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        io::stdin().read_line(&mut answer).is_ok()
            && matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

fn report(what: &str, persistence: &Persistence) {
    match persistence {
        Persistence::Remote => println!("{what} saved."),
        Persistence::LocalOnly { reason } => {
            println!("{what} saved locally only, remote store failed: {reason}")
        }
    }
}

async fn run_admin(
    store: Arc<PortfolioStore<RemoteBackend>>,
    credentials: (String, String),
    yes: bool,
    action: AdminAction,
) -> anyhow::Result<()> {
    let session = AccessGate.login(Arc::clone(&store), &credentials.0, &credentials.1)?;
    let mut form = ProjectForm::new();

    match action {
        AdminAction::AddProject(fields) => {
            fields.apply(&mut form);
            let (project, persistence) = session.submit_project(&mut form).await?;
            report(&format!("Project {} ({})", project.content.title, project.id), &persistence);
        }
        AdminAction::EditProject { id, fields } => {
            let snapshot = store.snapshot();
            let project = snapshot
                .project(&id)
                .with_context(|| format!("No project with id {id}"))?;
            form.edit(project);
            fields.apply(&mut form);
            let (project, persistence) = session.submit_project(&mut form).await?;
            report(&format!("Project {}", project.content.title), &persistence);
        }
        AdminAction::DeleteProject { id } => {
            match session.delete_project(&mut form, &id, confirm_on_stdin(yes)).await {
                Some(persistence) => report("Deletion", &persistence),
                None => println!("Cancelled."),
            }
        }
        AdminAction::SetContact {
            name,
            role,
            whatsapp,
            email,
            location,
        } => {
            let mut contact = ContactForm::from_contact(&store.snapshot().contact);
            contact.name = name.unwrap_or(contact.name);
            contact.role = role.unwrap_or(contact.role);
            contact.whatsapp_number = whatsapp.unwrap_or(contact.whatsapp_number);
            contact.email = email.unwrap_or(contact.email);
            contact.location = location.unwrap_or(contact.location);
            match session.set_contact(&contact).await {
                Some(persistence) => report("Contact", &persistence),
                None => println!("Nothing changed."),
            }
        }
        AdminAction::SetImage { url, file } => {
            let input = match (url, file) {
                (Some(url), _) => ProfileImageInput::Url(url),
                (None, Some(file)) => ProfileImageInput::File(file),
                (None, None) => anyhow::bail!("Pass either --url or --file"),
            };
            let persistence = session.set_profile_image(&input).await?;
            report("Profile image", &persistence);
        }
        AdminAction::Reset => {
            if session.reset(confirm_on_stdin(yes)).await? {
                println!("Portfolio restored to defaults.");
            } else {
                println!("Cancelled.");
            }
        }
        AdminAction::SeedRemote => {
            anyhow::ensure!(store.remote().is_enabled(), "Remote store is not configured");
            let report = seed_defaults(store.remote()).await;
            println!(
                "Seeded {} projects ({} failed), contact: {}, profile image: {}",
                report.projects_added,
                report.projects_failed,
                report.contact_written,
                report.profile_written
            );
        }
        AdminAction::ClearRemote => {
            anyhow::ensure!(store.remote().is_enabled(), "Remote store is not configured");
            if confirm_on_stdin(yes)("Delete every project from the remote store?") {
                let removed = clear_projects(store.remote()).await?;
                println!("Removed {removed} remote projects.");
            } else {
                println!("Cancelled.");
            }
        }
    }

    Ok(())
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let store = Arc::new(open_portfolio(&config).await?);
    match command {
        Command::Show => println!("{}", site::render_page(&store.snapshot())),
        Command::Project { id } => {
            let snapshot = store.snapshot();
            let project = snapshot
                .project(&id)
                .with_context(|| format!("No project with id {id}"))?;
            println!("{}", site::render_project_detail(project));
        }
        Command::Status => {
            let snapshot = store.snapshot();
            println!("Local store:   {}", store.local().path().display());
            println!(
                "Remote store:  {}",
                config
                    .remote
                    .database_url
                    .as_deref()
                    .filter(|_| config.remote.is_configured())
                    .unwrap_or("not configured")
            );
            println!("Sync:          {}", site::render_sync_status(&snapshot.sync));
            println!("Projects:      {}", snapshot.projects.len());
        }
        Command::Watch => {
            let _live = store.watch().await;
            let mut reader = store.reader();
            println!("{}", site::render_page(&reader.snapshot()));
            loop {
                tokio::select! {
                    snapshot = reader.changed() => {
                        println!("{}", site::render_page(&snapshot?));
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
        Command::Admin {
            username,
            password,
            yes,
            action,
        } => run_admin(Arc::clone(&store), (username, password), yes, action).await?,
        #[cfg(feature = "gui")]
        Command::Gui => anyhow::bail!("The desktop viewer runs outside the async runtime"),
    }

    store.local().close().await
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "devfolio=debug" } else { "devfolio=warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        #[cfg(feature = "gui")]
        Command::Gui => Ok(devfolio::gui::DevfolioApp::run(config)?),
        command => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run(command, config)),
    }
}
