use std::io::{BufRead, Write};
use std::path::PathBuf;

use tourney::prelude::*;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

const USAGE: &str = "\
usage: tourney-cli <command> [args]

  login <email> <password>
  register <name> <email> <password>
  logout
  profile
  tournaments
  tournament <id>
  create-tournament <name> <nb_players> <rules> [image-path]
  delete-tournament <id>
  join <id>
  leave <id>
  matches
  match <id>
  delete-match <id>";

#[derive(Debug)]
enum Command {
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    Logout,
    Profile,
    Tournaments,
    Tournament(TournamentId),
    CreateTournament { name: String, nb_players: u32, rules: String, image: Option<PathBuf> },
    DeleteTournament(TournamentId),
    Join(TournamentId),
    Leave(TournamentId),
    Matches,
    Match(MatchId),
    DeleteMatch(MatchId),
}

impl Command {
    fn parse(args: &[String]) -> Option<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let id = |s: &str| s.parse::<u64>().ok();
        let command = match args.as_slice() {
            ["login", email, password] => Self::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ["register", name, email, password] => Self::Register {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            ["logout"] => Self::Logout,
            ["profile"] => Self::Profile,
            ["tournaments"] => Self::Tournaments,
            ["tournament", n] => Self::Tournament(TournamentId(id(n)?)),
            ["create-tournament", name, nb, rules, rest @ ..] if rest.len() <= 1 => Self::CreateTournament {
                name: name.to_string(),
                nb_players: nb.parse().ok()?,
                rules: rules.to_string(),
                image: rest.first().map(PathBuf::from),
            },
            ["delete-tournament", n] => Self::DeleteTournament(TournamentId(id(n)?)),
            ["join", n] => Self::Join(TournamentId(id(n)?)),
            ["leave", n] => Self::Leave(TournamentId(id(n)?)),
            ["matches"] => Self::Matches,
            ["match", n] => Self::Match(MatchId(id(n)?)),
            ["delete-match", n] => Self::DeleteMatch(MatchId(id(n)?)),
            _ => return None,
        };
        Some(command)
    }

    /// The screen this command acts on, checked against the route guard.
    fn route(&self) -> Route {
        match self {
            Self::Login { .. } => Route::Login,
            Self::Register { .. } => Route::Register,
            Self::Logout | Self::Tournaments | Self::DeleteTournament(_) => Route::Tournaments,
            Self::Profile => Route::Profile,
            Self::Tournament(id) | Self::Join(id) | Self::Leave(id) => Route::TournamentDetails(*id),
            Self::CreateTournament { .. } => Route::CreateTournament,
            Self::Matches => Route::Matches,
            Self::Match(id) | Self::DeleteMatch(id) => Route::MatchDetails(*id),
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn show_error(error: Option<&str>) {
    if let Some(error) = error {
        eprintln!("error: {error}");
    }
}

fn print_tournament(t: &Tournament, mine: bool) {
    let marker = if mine { " (yours)" } else { "" };
    println!("#{} {}{}  [{} players]", t.id, t.name, marker, t.nb_players);
}

fn print_match(m: &Match) {
    println!(
        "#{} {}  User {} {} - {} User {}  (tournament {})",
        m.id, m.match_date, m.player_1_id, m.score_player_1, m.score_player_2, m.player_2_id, m.tournoi_id
    );
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

async fn run(app: &App<HttpTransport>, command: Command) -> Result<(), TourneyError> {
    let ctx = app.context().clone();

    match command {
        Command::Login { email, password } => {
            let mut view = LoginView::new(ctx);
            view.credentials = Credentials::new(email, password);
            let result = view.submit().await;
            show_error(view.error.as_deref());
            result?;
            println!("signed in as user {}", app.session().user_id().unwrap_or_default());
        }
        Command::Register { name, email, password } => {
            let mut view = RegisterView::new(ctx);
            view.registration = Registration {
                name,
                email,
                password_confirmation: password.clone(),
                password,
            };
            let result = view.submit().await;
            show_error(view.error.as_deref());
            result?;
            println!("account created, you can now log in");
        }
        Command::Logout => {
            logout(&ctx).await?;
            println!("signed out");
        }
        Command::Profile => {
            let mut view = ProfileView::new(ctx);
            view.mount().await;
            show_error(view.state.error.as_deref());
            if let Some(user) = &view.state.data {
                println!("{} <{}>  (user {})", user.name, user.email, user.id);
            }
        }
        Command::Tournaments => {
            let mut view = TournamentListView::new(ctx);
            view.mount().await;
            show_error(view.state.error.as_deref());
            for t in view.tournaments() {
                print_tournament(t, view.can_manage(t));
            }
        }
        Command::Tournament(id) => {
            let mut view = TournamentDetailsView::new(ctx, id);
            view.mount().await;
            show_error(view.state.error.as_deref());
            if let Some(t) = &view.state.data {
                println!("{}\n  rules: {}\n  created by: {}", t.name, t.rules, view.created_by_label().unwrap_or_default());
            }
            show_error(view.roster.state.error.as_deref());
            for player in view.roster.players() {
                let you = if view.roster.is_you(player) { " (You)" } else { "" };
                println!("  - User {}{}", player.player_id, you);
            }
        }
        Command::CreateTournament { name, nb_players, rules, image } => {
            let mut view = CreateTournamentView::new(ctx);
            view.form = TournamentForm {
                name,
                rules,
                nb_players,
                image: match image {
                    Some(path) => Some(FileUpload::from_path(path).await?),
                    None => None,
                },
            };
            let result = view.submit().await;
            show_error(view.error.as_deref());
            result?;
            println!("tournament created");
        }
        Command::DeleteTournament(id) => {
            let mut view = TournamentListView::new(ctx);
            let result = view.delete(id, &ask).await;
            show_error(view.state.error.as_deref());
            if result? {
                println!("tournament {id} deleted");
            }
        }
        Command::Join(id) => {
            let mut view = RosterView::new(ctx, id);
            let result = view.join().await;
            show_error(view.state.error.as_deref());
            result?;
            println!("joined tournament {id} ({} players)", view.players().len());
        }
        Command::Leave(id) => {
            let mut view = RosterView::new(ctx, id);
            let result = view.leave(&ask).await;
            show_error(view.state.error.as_deref());
            if result? {
                println!("left tournament {id}");
            }
        }
        Command::Matches => {
            let mut view = MatchListView::new(ctx);
            view.mount().await;
            show_error(view.state.error.as_deref());
            view.matches().iter().for_each(print_match);
        }
        Command::Match(id) => {
            let mut view = MatchDetailsView::new(ctx, id);
            view.mount().await;
            show_error(view.state.error.as_deref());
            if let Some(m) = &view.state.data {
                print_match(m);
            }
        }
        Command::DeleteMatch(id) => {
            let mut view = MatchDetailsView::new(ctx, id);
            let result = view.delete(&ask).await;
            show_error(view.state.error.as_deref());
            if result? {
                println!("match {id} deleted");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env()?;
    tourney::logging::init(&config.log_filter);
    // A CLI invocation is one process per command, so the session has to
    // live on disk to survive between them.
    if config.session_file.is_none() {
        config.session_file = Some(PathBuf::from(".tourney-session.json"));
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = Command::parse(&args) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let app = App::from_config(&config)?;
    let route = command.route();
    if app.open(&route.path()) != route {
        eprintln!("not signed in: run `tourney-cli login <email> <password>` first");
        std::process::exit(1);
    }

    if let Err(e) = run(&app, command).await {
        tracing::debug!(error = %e, "command failed");
        if app.current() == Some(Route::Login) && !app.session().is_authenticated() {
            eprintln!("session expired, please log in again");
        }
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(
            Command::parse(&args("join 4")),
            Some(Command::Join(TournamentId(4)))
        ));
        assert!(matches!(
            Command::parse(&args("create-tournament Cup 8 bo3")),
            Some(Command::CreateTournament { nb_players: 8, image: None, .. })
        ));
        assert!(Command::parse(&args("create-tournament Cup 8")).is_none());
        assert!(Command::parse(&args("join four")).is_none());
        assert!(Command::parse(&args("")).is_none());
    }

    #[test]
    fn test_auth_commands_are_public() {
        let login = Command::parse(&args("login a@b.c pw")).unwrap();
        assert!(login.route().is_public());
        assert!(!Command::Matches.route().is_public());
    }
}
