use crate::error::CamviewError;

use camview_core::error::ShellError;
use camview_core::live::FrameConnector;
use camview_core::shell::ViewShell;

use std::io::Write;

use log::info;

pub async fn login<C: FrameConnector>(
    shell: &mut ViewShell<C>,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    let session = shell.login(username, password).await?;
    info!("Logged in as {} (id {})", session.username, session.user_id);

    writeln!(out, "Logged in as {} ({})", session.username, session.role)?;
    Ok(())
}

/// Logging out without a session still clears any stale token.
pub async fn logout<C: FrameConnector>(
    shell: &mut ViewShell<C>,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.logout().await?;
    writeln!(out, "Logged out")?;
    Ok(())
}

pub fn whoami<C: FrameConnector>(
    shell: &ViewShell<C>,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    let Some(session) = shell.current_session() else {
        return Err(ShellError::not_authenticated().into());
    };

    let tabs: Vec<&str> = shell.visible_tabs().iter().map(|tab| tab.title()).collect();

    writeln!(out, "{} (id {})", session.username, session.user_id)?;
    writeln!(out, "Role: {}", session.role)?;
    writeln!(out, "Tabs: {}", tabs.join(", "))?;
    Ok(())
}
