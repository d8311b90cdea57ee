//! Auth command handlers: register, login, logout, whoami, users.

use secrecy::SecretString;
use tabled::Tabled;

use peek_core::{CoreError, NewUser, RegistrationForm, Route, User, messages};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Name")]
    full_name: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            email: u.email.clone().unwrap_or_default(),
            full_name: u.full_name.clone().unwrap_or_default(),
            role: u.role.clone().unwrap_or_default(),
        }
    }
}

fn user_detail(u: &User) -> String {
    let dash = || "-".to_owned();
    [
        format!("ID:      {}", u.id),
        format!("Email:   {}", u.email.clone().unwrap_or_else(dash)),
        format!("Name:    {}", u.full_name.clone().unwrap_or_else(dash)),
        format!("Role:    {}", u.role.clone().unwrap_or_else(dash)),
        format!("Tenant:  {}", u.tenant_id.clone().unwrap_or_else(dash)),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Register {
            name,
            description,
            email,
            full_name,
            password,
            confirm_password,
        } => {
            let owner_password = util::secret_or_prompt(password, "Password: ")?;
            let confirm_password = util::secret_or_prompt(confirm_password, "Confirm password: ")?;
            let form = RegistrationForm {
                name,
                description: description.unwrap_or_default(),
                owner_email: email,
                owner_full_name: full_name,
                owner_password,
                confirm_password,
            };

            let mut flow = ctx.portal.registration();
            let pb = util::spinner("Registering...", global.quiet);
            let result = flow.submit(&form).await;
            pb.finish_and_clear();

            match result {
                Ok(tenant) => {
                    if !global.quiet {
                        let name = tenant.map_or_else(|| form.name.trim().to_owned(), |t| t.name);
                        eprintln!("✓ Organization '{name}' registered");
                        if ctx.history.current() == Some(Route::Login) {
                            eprintln!("  Next: peek auth login --email {}", form.owner_email);
                        }
                    }
                    Ok(())
                }
                Err(e) => {
                    let shown = flow.error().unwrap_or(messages::REGISTRATION_FAILED);
                    Err(CliError::from_view(e, shown))
                }
            }
        }

        AuthCommand::Login { email, password } => {
            let email = util::text_or_prompt(
                email.or_else(|| ctx.resolved.profile.email.clone()),
                "Email",
            )?;
            let password = util::secret_or_prompt(password, "Password: ")?;

            match ctx.portal.login(&email, &password).await {
                Ok(()) => {
                    if !global.quiet {
                        eprintln!(
                            "✓ Signed in as {email} (profile '{}')",
                            ctx.resolved.profile_name
                        );
                    }
                    Ok(())
                }
                Err(e @ (CoreError::Unauthorized { .. } | CoreError::Api { .. })) => {
                    Err(CliError::AuthFailed {
                        message: e.user_message(messages::LOGIN_FAILED),
                    })
                }
                Err(e) => Err(e.into()),
            }
        }

        AuthCommand::Logout => {
            ctx.portal.logout()?;
            if !global.quiet {
                eprintln!("✓ Signed out");
            }
            Ok(())
        }

        AuthCommand::Whoami => {
            let me = ctx.portal.current_user().await?;
            let out = output::render_single(&global.output, &me, user_detail, |u| {
                u.email.clone().unwrap_or_else(|| u.id.clone())
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthCommand::Users(args) => handle_users(ctx, args, global).await,
    }
}

async fn handle_users(ctx: &Context, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List => {
            let users = ctx.portal.users().await?;
            let out = output::render_list(
                &global.output,
                &users,
                |u| UserRow::from(u),
                |u| u.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Create {
            email,
            full_name,
            role,
            password,
        } => {
            let password: SecretString = util::secret_or_prompt(password, "Initial password: ")?;
            let user = ctx
                .portal
                .create_user(&NewUser {
                    email,
                    full_name,
                    password,
                    role,
                })
                .await?;
            if !global.quiet {
                eprintln!("✓ User {} created", user.email.as_deref().unwrap_or(&user.id));
            }
            Ok(())
        }
    }
}
