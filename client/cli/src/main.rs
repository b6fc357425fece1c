use clap::{Parser, Subcommand};
use cloudbox_core::{
    CloudClient, Config, Credentials, FileId, FolderId, GroupId, Language, RoleId, SessionStore,
    Theme, Upload, UserId,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Parser)]
#[command(name = "cloudbox")]
#[command(about = "Cloudbox file storage client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session token
    Login {
        /// Account email
        email: String,
    },
    /// Create a new account
    Signup {
        /// Account email
        email: String,
    },
    /// Forget the session token
    Logout,
    /// Change the account password
    Passwd,
    /// List files and folders
    Ls {
        /// Folder id (root when omitted)
        folder: Option<FolderId>,
    },
    /// Create a folder
    Mkdir {
        name: String,
        /// Parent folder id (root when omitted)
        #[arg(long)]
        parent: Option<FolderId>,
    },
    /// Delete a folder
    Rmdir { folder: FolderId },
    /// Upload a local file
    Upload {
        path: PathBuf,
        /// Target folder id
        #[arg(long, default_value_t = 0)]
        folder: FolderId,
    },
    /// Download a file
    Download {
        file: FileId,
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Move files to another folder
    Mv {
        #[arg(required = true)]
        files: Vec<FileId>,
        /// Target folder id
        #[arg(long)]
        to: FolderId,
    },
    /// Delete files
    Rm { files: Vec<FileId> },
    /// Manage groups
    #[command(subcommand)]
    Group(GroupCommand),
    /// Manage roles
    #[command(subcommand)]
    Role(RoleCommand),
    /// Manage favorites
    #[command(subcommand)]
    Fav(FavCommand),
    /// Administrative reports
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Show or change interface preferences
    Prefs {
        #[arg(long)]
        language: Option<Language>,
        #[arg(long)]
        theme: Option<Theme>,
    },
}

#[derive(Subcommand)]
enum GroupCommand {
    /// List all groups
    Ls,
    /// List the groups of a user
    Of { user: UserId },
    Create { name: String },
    Rename { group: GroupId, name: String },
    Delete { group: GroupId },
    /// Add a user to a group
    Add { group: GroupId, user: UserId },
    /// Remove a user from a group
    Remove { group: GroupId, user: UserId },
}

#[derive(Subcommand)]
enum RoleCommand {
    /// List all roles
    Ls,
    /// List the roles of a user
    Of { user: UserId },
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete { role: RoleId },
    /// Grant permissions to a role
    Grant {
        role: RoleId,
        #[arg(required = true)]
        permissions: Vec<i64>,
    },
    /// List the permissions of a user (yourself when omitted)
    Perms { user: Option<UserId> },
    /// Assign roles to a user
    Assign {
        user: UserId,
        #[arg(required = true)]
        roles: Vec<RoleId>,
    },
}

#[derive(Subcommand)]
enum FavCommand {
    /// List favorite files and folders
    Ls,
    /// Mark or unmark a file
    File {
        file: FileId,
        #[arg(long)]
        off: bool,
    },
    /// Mark or unmark a folder
    Folder {
        folder: FolderId,
        #[arg(long)]
        off: bool,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    Stats,
    Users,
    /// Everything a user owns
    Content { user: UserId },
    Files,
    Folders,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudbox_cli=info,cloudbox_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing::debug!(
        auth = %config.endpoints.auth_url,
        files = %config.endpoints.file_url,
        "using endpoints"
    );
    let mut store = SessionStore::open_default();
    let client = CloudClient::new(config.endpoints.clone())?;

    match cli.command {
        Commands::Login { email } => {
            let password = rpassword::prompt_password("password: ")?;
            let body = client.login(&Credentials::new(&email, password)).await?;
            let token = body
                .get("token")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow::anyhow!("server did not return a token"))?;
            store.update(|s| s.sign_in(token, &email));
            println!("logged in as {}", email);
        }
        Commands::Signup { email } => {
            let password = rpassword::prompt_password("password: ")?;
            let confirm = rpassword::prompt_password("confirm password: ")?;
            if password != confirm {
                anyhow::bail!("passwords do not match");
            }
            client.signup(&Credentials::new(&email, password)).await?;
            println!("account created. run: cloudbox login {}", email);
        }
        Commands::Logout => {
            store.update(|s| s.sign_out());
            println!("logged out");
        }
        Commands::Passwd => {
            let token = require_token(&store)?;
            let current = rpassword::prompt_password("current password: ")?;
            let new = rpassword::prompt_password("new password: ")?;
            client.change_password(&token, &current, &new).await?;
            println!("password changed");
        }
        Commands::Ls { folder } => {
            let token = require_token(&store)?;
            let folders = client.get_folders(&token, folder).await?;
            let files = client.get_file_tree(&token, folder).await?;
            render::listing(&folders, &files);
        }
        Commands::Mkdir { name, parent } => {
            let token = require_token(&store)?;
            print_json(&client.create_folder(&token, &name, parent).await?)?;
        }
        Commands::Rmdir { folder } => {
            let token = require_token(&store)?;
            client.delete_folder(&token, folder).await?;
            println!("folder {} deleted", folder);
        }
        Commands::Upload { path, folder } => {
            let token = require_token(&store)?;
            let upload = Upload::from_path(&path).await?;
            print_json(&client.upload_file(&token, folder, upload).await?)?;
        }
        Commands::Download { file, output } => {
            let token = require_token(&store)?;
            let bytes = client.download_file(&token, file).await?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, &bytes).await?;
                    println!(
                        "{} written to {}",
                        render::format_size(bytes.len() as u64),
                        path.display()
                    );
                }
                None => std::io::stdout().write_all(&bytes)?,
            }
        }
        Commands::Mv { files, to } => {
            let token = require_token(&store)?;
            let body = match files.as_slice() {
                [single] => client.move_file(&token, *single, to).await?,
                many => client.move_files(&token, many, to).await?,
            };
            print_json(&body)?;
        }
        Commands::Rm { files } => {
            let token = require_token(&store)?;
            client.delete_files(&token, &files).await?;
            println!("{} file(s) deleted", files.len());
        }
        Commands::Group(cmd) => group(&client, &require_token(&store)?, cmd).await?,
        Commands::Role(cmd) => role(&client, &require_token(&store)?, cmd).await?,
        Commands::Fav(cmd) => fav(&client, &require_token(&store)?, cmd).await?,
        Commands::Admin(cmd) => admin(&client, &require_token(&store)?, cmd).await?,
        Commands::Prefs { language, theme } => {
            store.update(|s| {
                if let Some(language) = language {
                    s.preferences.language = language;
                }
                if let Some(theme) = theme {
                    s.preferences.theme = theme;
                }
            });
            render::session(store.session());
        }
    }

    Ok(())
}

async fn group(client: &CloudClient, token: &str, cmd: GroupCommand) -> anyhow::Result<()> {
    match cmd {
        GroupCommand::Ls => print_json(&client.get_all_groups(token).await?),
        GroupCommand::Of { user } => print_json(&client.get_user_groups(token, user).await?),
        GroupCommand::Create { name } => print_json(&client.create_group(token, &name).await?),
        GroupCommand::Rename { group, name } => {
            print_json(&client.rename_group(token, group, &name).await?)
        }
        GroupCommand::Delete { group } => print_json(&client.delete_group(token, group).await?),
        GroupCommand::Add { group, user } => {
            print_json(&client.add_user_to_group(token, user, group).await?)
        }
        GroupCommand::Remove { group, user } => {
            print_json(&client.remove_user_from_group(token, user, group).await?)
        }
    }
}

async fn role(client: &CloudClient, token: &str, cmd: RoleCommand) -> anyhow::Result<()> {
    match cmd {
        RoleCommand::Ls => print_json(&client.get_all_roles(token).await?),
        RoleCommand::Of { user } => print_json(&client.get_user_roles(token, user).await?),
        RoleCommand::Create { name, description } => {
            print_json(&client.create_role(token, &name, &description).await?)
        }
        RoleCommand::Delete { role } => print_json(&client.delete_role(token, role).await?),
        RoleCommand::Grant { role, permissions } => {
            print_json(&client.assign_permissions_to_role(token, role, &permissions).await?)
        }
        RoleCommand::Perms { user } => {
            let listing = match user {
                Some(user) => client.get_user_permissions(token, user).await?,
                None => client.get_current_user_permissions(token).await?,
            };
            print_json(&listing)
        }
        RoleCommand::Assign { user, roles } => {
            print_json(&client.assign_roles_to_user(token, user, &roles).await?)
        }
    }
}

async fn fav(client: &CloudClient, token: &str, cmd: FavCommand) -> anyhow::Result<()> {
    match cmd {
        FavCommand::Ls => {
            let favorites = client.get_all_favorites(token).await?;
            render::favorites(&favorites);
            Ok(())
        }
        FavCommand::File { file, off } => {
            print_json(&client.set_file_favorite(token, file, !off).await?)
        }
        FavCommand::Folder { folder, off } => {
            print_json(&client.set_folder_favorite(token, folder, !off).await?)
        }
    }
}

async fn admin(client: &CloudClient, token: &str, cmd: AdminCommand) -> anyhow::Result<()> {
    let body = match cmd {
        AdminCommand::Stats => client.get_system_stats(token).await?,
        AdminCommand::Users => client.get_all_users(token).await?,
        AdminCommand::Content { user } => client.get_user_content(token, user).await?,
        AdminCommand::Files => client.get_all_files_admin(token).await?,
        AdminCommand::Folders => client.get_all_folders_admin(token).await?,
    };
    print_json(&body)
}

fn require_token(store: &SessionStore) -> anyhow::Result<String> {
    store
        .session()
        .token()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("not logged in. run: cloudbox login <email>"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
