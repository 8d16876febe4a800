//! Line-oriented terminal front-end.
//!
//! Reads one command per line and prints results. Redirects the router
//! makes on its own (validation timer, logout in another tab) are reported
//! between commands as soon as they are published.

use std::io::IsTerminal;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::{debug, warn};

use crate::api::auth::{SignupForm, LOGIN_FAILED, SIGNUP_FAILED};
use crate::api::jobs::DEFAULT_RECOMMENDATIONS;
use crate::api::ApiClient;
use crate::chat::render::render_blocks;
use crate::chat::Transcript;
use crate::listing::filters::sort_by_score;
use crate::listing::{normalize_score, CandidateBoard, CandidateQuery, JobQuery, MatchQuery, ScoreTier, TierCounts};
use crate::models::candidate::{CandidateStatus, StatusEmail};
use crate::models::user::Role;
use crate::models::RecordId;
use crate::routing::machine::Navigation;
use crate::routing::routes::LOGIN_PATH;
use crate::routing::RouterHandle;

const FETCH_FAILED: &str = "Request failed. Please try again.";

const HELP: &str = "\
Commands:
  login                      sign in with email and password
  signup                     create an account
  logout                     sign out of every tab
  go <path>                  navigate, e.g. go /user-dashboard
  chat <text>                ask the assistant
  jobs [term]                search all jobs
  matches [tier]             recruiter matches (excellent|verygood|good|fair|poor)
  candidates [term]          recruiter candidate pipeline
  status <id> <status>       move a candidate (available|under_review|interview_scheduled|hired|rejected)
  recommend [n]              top job recommendations
  whoami                     current session
  help                       this text
  quit                       exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login,
    Signup,
    Logout,
    Go(String),
    Chat(String),
    Jobs(String),
    Matches(Option<ScoreTier>),
    Candidates(String),
    Status(RecordId, CandidateStatus),
    Recommend(u32),
    Whoami,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "login" => Command::Login,
            "signup" => Command::Signup,
            "logout" => Command::Logout,
            "go" if rest.is_empty() => return Err("Usage: go <path>".into()),
            "go" => Command::Go(rest.to_string()),
            "chat" => Command::Chat(rest.to_string()),
            "jobs" => Command::Jobs(rest.to_string()),
            "matches" => Command::Matches(ScoreTier::parse(rest)),
            "candidates" => Command::Candidates(rest.to_string()),
            "status" => {
                let mut parts = rest.split_whitespace();
                let (Some(id), Some(status), None) = (parts.next(), parts.next(), parts.next()) else {
                    return Err("Usage: status <candidate id> <status>".into());
                };
                let status = CandidateStatus::parse(status).ok_or_else(|| format!("Unknown status '{status}'"))?;
                Command::Status(parse_id(id), status)
            }
            "recommend" if rest.is_empty() => Command::Recommend(DEFAULT_RECOMMENDATIONS),
            "recommend" => match rest.parse::<u32>() {
                Ok(n) if n > 0 => Command::Recommend(n),
                _ => return Err("Usage: recommend [n], n > 0".into()),
            },
            "whoami" => Command::Whoami,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("Unknown command '{other}'. Type 'help'.")),
        };
        Ok(cmd)
    }
}

fn parse_id(s: &str) -> RecordId {
    s.parse::<i64>().map(RecordId::from).unwrap_or_else(|_| RecordId::from(s))
}

pub struct Shell {
    api: ApiClient,
    router: RouterHandle,
    system_prompt: String,
    transcript: Transcript,
    board: CandidateBoard,
    last: Option<Navigation>,
    ansi: bool,
}

impl Shell {
    pub fn new(api: ApiClient, router: RouterHandle, system_prompt: String) -> Self {
        Self {
            api,
            router,
            system_prompt,
            transcript: Transcript::new(),
            board: CandidateBoard::default(),
            last: None,
            ansi: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Runs until `quit` or end of input.
    pub async fn run<R, W>(mut self, input: R, mut out: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = BufReader::new(input).lines();
        let mut updates = self.router.watch();

        let start = updates.borrow_and_update().clone();
        self.show(&mut out, start).await?;
        write(&mut out, "Type 'help' for commands.\n").await?;

        loop {
            write(&mut out, "> ").await?;
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        warn!("Router stopped; leaving shell");
                        break;
                    }
                    let nav = updates.borrow_and_update().clone();
                    write(&mut out, "\n").await?;
                    self.report_if_moved(&mut out, nav).await?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match Command::parse(&line) {
                        Ok(Command::Quit) => break,
                        Ok(cmd) => self.execute(cmd, &mut lines, &mut out).await?,
                        Err(msg) => write(&mut out, &format!("{msg}\n")).await?,
                    }
                    let nav = updates.borrow_and_update().clone();
                    self.report_if_moved(&mut out, nav).await?;
                }
            }
        }

        write(&mut out, "Bye.\n").await?;
        Ok(())
    }

    async fn execute<R, W>(&mut self, cmd: Command, lines: &mut Lines<BufReader<R>>, out: &mut W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        debug!("Shell command: {cmd:?}");
        match cmd {
            Command::Empty | Command::Quit => {}
            Command::Help => write(out, &format!("{HELP}\n")).await?,
            Command::Whoami => {
                let text = match self.api.session().current() {
                    Some(s) => format!("Signed in as {} ({})\n", s.user.display_name(), s.role()),
                    None => "Not signed in\n".to_string(),
                };
                write(out, &text).await?;
            }
            Command::Go(path) => {
                if let Some(nav) = self.router.navigate(&path).await {
                    self.show(out, nav).await?;
                }
            }
            Command::Login => self.login(lines, out).await?,
            Command::Signup => self.signup(lines, out).await?,
            Command::Logout => {
                self.transcript.clear();
                self.board = CandidateBoard::default();
                if let Some(nav) = self.router.logout().await {
                    self.show(out, nav).await?;
                }
            }
            Command::Chat(text) => self.chat(&text, out).await?,
            Command::Jobs(term) => self.jobs(term, out).await?,
            Command::Matches(tier) => self.matches(tier, out).await?,
            Command::Candidates(term) => self.candidates(term, out).await?,
            Command::Status(id, status) => self.set_status(id, status, out).await?,
            Command::Recommend(n) => self.recommend(n, out).await?,
        }
        Ok(())
    }

    async fn login<R, W>(&mut self, lines: &mut Lines<BufReader<R>>, out: &mut W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let Some(email) = prompt(lines, out, "Email: ").await? else {
            return Ok(());
        };
        let Some(password) = prompt(lines, out, "Password: ").await? else {
            return Ok(());
        };

        match self.api.login(&email, &password).await {
            Ok(resp) => {
                write(out, &format!("Welcome, {}.\n", resp.user.display_name())).await?;
                if let Some(nav) = self.router.login_completed().await {
                    self.show(out, nav).await?;
                }
            }
            Err(e) => write(out, &format!("{}\n", e.display_message(LOGIN_FAILED))).await?,
        }
        Ok(())
    }

    async fn signup<R, W>(&mut self, lines: &mut Lines<BufReader<R>>, out: &mut W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut fields = Vec::with_capacity(5);
        for label in ["Username: ", "Email: ", "Password: ", "Confirm password: ", "Role [user/recruiter]: "] {
            match prompt(lines, out, label).await? {
                Some(value) => fields.push(value),
                None => return Ok(()),
            }
        }
        let [username, email, password, confirm_password, role]: [String; 5] = match fields.try_into() {
            Ok(fields) => fields,
            Err(_) => return Ok(()),
        };
        let form = SignupForm {
            username,
            email,
            password,
            confirm_password,
            role: Role::from(role.as_str()),
        };

        match self.api.signup(form).await {
            Ok(_) => {
                write(out, "Account created. Please log in.\n").await?;
                if let Some(nav) = self.router.navigate(LOGIN_PATH).await {
                    self.show(out, nav).await?;
                }
            }
            Err(e) => write(out, &format!("{}\n", e.display_message(SIGNUP_FAILED))).await?,
        }
        Ok(())
    }

    async fn chat<W: AsyncWrite + Unpin>(&mut self, text: &str, out: &mut W) -> Result<()> {
        if !self.signed_in(out).await? {
            return Ok(());
        }
        if self.transcript.push_user(text).is_none() {
            return write(out, "Type a message first.\n").await;
        }

        match self.api.send_message(text, &self.system_prompt, None).await {
            Ok(reply) => {
                let msg = self.transcript.push_reply(reply);
                write(out, &render_blocks(&msg.blocks, self.ansi)).await?;
            }
            Err(e) => {
                let shown = self.transcript.fail(&e).to_string();
                write(out, &format!("{shown}\n")).await?;
            }
        }
        Ok(())
    }

    async fn jobs<W: AsyncWrite + Unpin>(&mut self, term: String, out: &mut W) -> Result<()> {
        if !self.signed_in(out).await? {
            return Ok(());
        }
        let jobs = match self.api.all_jobs().await {
            Ok(jobs) => jobs,
            Err(e) => return write(out, &format!("{}\n", e.display_message(FETCH_FAILED))).await,
        };

        let query = JobQuery {
            term,
            ..Default::default()
        };
        let hits = query.apply(&jobs);
        let mut text = format!("{} of {} jobs\n", hits.len(), jobs.len());
        for job in hits {
            text.push_str(&format!(
                "  #{} {} at {} ({}) [{}]\n",
                job.id,
                job.display_title().unwrap_or("Untitled"),
                job.company.as_deref().unwrap_or("-"),
                job.location.as_deref().unwrap_or("-"),
                job.kind().unwrap_or("-"),
            ));
        }
        write(out, &text).await
    }

    async fn matches<W: AsyncWrite + Unpin>(&mut self, tier: Option<ScoreTier>, out: &mut W) -> Result<()> {
        if !self.signed_in(out).await? {
            return Ok(());
        }
        let mut all = match self.api.matches().await {
            Ok(all) => all,
            Err(e) => return write(out, &format!("{}\n", e.display_message(FETCH_FAILED))).await,
        };
        sort_by_score(&mut all, |m| m.final_score);

        let counts = TierCounts::tally(all.iter().map(|m| m.final_score));
        let mut text = ScoreTier::ALL
            .iter()
            .map(|t| format!("{t}: {}", counts.get(*t)))
            .collect::<Vec<_>>()
            .join("  ");
        text.push('\n');

        let query = MatchQuery {
            term: String::new(),
            tier,
        };
        for m in query.apply(&all) {
            let pct = normalize_score(m.final_score);
            text.push_str(&format!(
                "  {:>3}% {:<9} {} / {}\n",
                pct,
                ScoreTier::of(pct).as_str(),
                m.title.as_deref().unwrap_or("-"),
                m.name.as_deref().unwrap_or("-"),
            ));
        }
        write(out, &text).await
    }

    async fn candidates<W: AsyncWrite + Unpin>(&mut self, term: String, out: &mut W) -> Result<()> {
        if !self.signed_in(out).await? {
            return Ok(());
        }
        let mut list = match self.api.my_candidates().await {
            Ok(list) => list,
            Err(e) => return write(out, &format!("{}\n", e.display_message(FETCH_FAILED))).await,
        };
        sort_by_score(&mut list, |c| c.final_score);
        self.board = CandidateBoard::new(list);

        let stats = self.board.statistics();
        let mut text = format!(
            "{} candidates, {} under review, {} interviewing, {} hired\n",
            stats.total_candidates, stats.under_review, stats.interview_scheduled, stats.hired
        );
        let query = CandidateQuery {
            term,
            ..Default::default()
        };
        for c in query.apply(self.board.candidates()) {
            text.push_str(&format!(
                "  #{} {:>3}% {} <{}> {}\n",
                c.candidate_id,
                normalize_score(c.final_score),
                c.name.as_deref().unwrap_or("-"),
                c.email.as_deref().unwrap_or("-"),
                c.status,
            ));
        }
        write(out, &text).await
    }

    async fn set_status<W: AsyncWrite + Unpin>(
        &mut self,
        id: RecordId,
        status: CandidateStatus,
        out: &mut W,
    ) -> Result<()> {
        if !self.signed_in(out).await? {
            return Ok(());
        }
        let Some(candidate) = self.board.get(&id) else {
            return write(out, "Unknown candidate. Run 'candidates' first.\n").await;
        };
        let email = match (&candidate.email, status.notifies_candidate()) {
            (Some(address), true) => Some(StatusEmail {
                candidate_email: address.clone(),
                candidate_name: candidate.name.clone().unwrap_or_default(),
                job_title: candidate.job_title.clone().unwrap_or_default(),
                company: candidate.company.clone().unwrap_or_default(),
                additional_notes: None,
            }),
            _ => None,
        };

        let Some(pending) = self.board.set_status(&id, status) else {
            return write(out, &format!("Candidate #{id} is already {status}.\n")).await;
        };
        match self.api.update_candidate_status(&id, status, email.as_ref()).await {
            Ok(_) => write(out, &format!("Candidate #{id} is now {status}.\n")).await,
            Err(e) => {
                self.board.revert(pending);
                write(out, &format!("{}\n", e.display_message(FETCH_FAILED))).await
            }
        }
    }

    async fn recommend<W: AsyncWrite + Unpin>(&mut self, n: u32, out: &mut W) -> Result<()> {
        if !self.signed_in(out).await? {
            return Ok(());
        }
        let recs = match self.api.recommendations(n).await {
            Ok(recs) => recs,
            Err(e) => return write(out, &format!("{}\n", e.display_message(FETCH_FAILED))).await,
        };
        if recs.is_empty() {
            return write(out, "No recommendations yet. Upload a resume first.\n").await;
        }
        let mut text = String::new();
        for rec in &recs {
            text.push_str(&format!(
                "  {:>3}% {} at {}\n",
                normalize_score(rec.final_score),
                rec.job.display_title().unwrap_or("Untitled"),
                rec.job.company.as_deref().unwrap_or("-"),
            ));
        }
        write(out, &text).await
    }

    async fn signed_in<W: AsyncWrite + Unpin>(&self, out: &mut W) -> Result<bool> {
        if self.router.current().state.is_authenticated() {
            return Ok(true);
        }
        write(out, "Please log in first.\n").await?;
        Ok(false)
    }

    async fn report_if_moved<W: AsyncWrite + Unpin>(&mut self, out: &mut W, nav: Navigation) -> Result<()> {
        if self.last.as_ref() == Some(&nav) {
            return Ok(());
        }
        if self.last.as_ref().map(|l| &l.location) != Some(&nav.location) {
            write(out, &format!("Session changed; now at {}\n", nav.location)).await?;
        }
        self.show(out, nav).await
    }

    /// Prints where the tab landed, with the header bar outside the auth pages.
    async fn show<W: AsyncWrite + Unpin>(&mut self, out: &mut W, nav: Navigation) -> Result<()> {
        let mut text = String::new();
        if nav.redirected {
            text.push_str(&format!("Redirected to {}\n", nav.location));
        }
        if nav.shows_chrome() {
            let who = self
                .api
                .session()
                .current()
                .map(|s| format!("{} [{}] ({})", s.user.display_name(), s.user.initial(), s.role()))
                .unwrap_or_else(|| "guest".to_string());
            text.push_str(&format!("== Matcher | {} | {} ==\n", nav.location, who));
        } else {
            text.push_str(&format!("[{}]\n", nav.location));
        }
        self.last = Some(nav);
        write(out, &text).await
    }
}

async fn write<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

/// Reads one answer; `None` at end of input.
async fn prompt<R, W>(lines: &mut Lines<BufReader<R>>, out: &mut W, label: &str) -> Result<Option<String>>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write(out, label).await?;
    Ok(lines.next_line().await?.map(|l| l.trim_end().to_string()))
}
