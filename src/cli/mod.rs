//!
//! clientele console
//! -----------------
//! Interactive front end over the CRM REST API. Each command maps to one
//! screen of the web console; navigation to a protected screen goes through
//! the authorization guard, and every request failure is rendered inline.

pub mod outputformatter;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use rustyline::error::ReadlineError;

use crate::api::{analytics, auth, customers, interactions, users};
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::guard::{self, Access, ADMIN_ONLY, OPEN};
use crate::models::{Customer, CustomerType, Interaction, InteractionStatus, InteractionType};
use crate::session::{self, Role, Session, SessionStore};
use crate::validate;

use self::outputformatter::{print_record, print_table};

const MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

struct Console {
    rt: tokio::runtime::Runtime,
    client: ApiClient,
    store: SessionStore,
    use_mock: bool,
}

/// Run the console until quit/EOF.
pub fn run(config: Config) -> Result<()> {
    let store = SessionStore::new(&config.state_dir).context("open session state")?;
    let client = ApiClient::new(&config, store.clone())?;
    let rt = tokio::runtime::Runtime::new()?;

    // Navigation chrome: the prompt and menu re-derive identity from the
    // store on every notifier pulse, never from command results.
    let chrome: Arc<RwLock<Session>> = Arc::new(RwLock::new(store.get()));
    {
        let c = chrome.clone();
        let s = store.clone();
        session::subscribe(move || {
            *c.write() = s.get();
        });
    }
    session::focus(&store);

    let console = Console { rt, client, store, use_mock: config.use_mock };
    println!("clientele console. Type 'help' for commands.");
    if console.use_mock {
        println!("mock mode: demo logins admin/admin123, sales/sales123, analyst/analyst123, user/user123");
    }

    let mut ed = rustyline::DefaultEditor::new()?;
    loop {
        // Pick up logins/logouts from other consoles before prompting.
        session::poll(&console.store);
        let prompt = {
            let s = chrome.read();
            match (&s.username, s.token.is_some()) {
                (Some(u), true) => format!("{}[{}]> ", u, s.role),
                _ => "clientele> ".to_string(),
            }
        };
        let line = match ed.readline(&prompt) {
            Ok(l) => l,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("input error: {}", e);
                break;
            }
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let _ = ed.add_history_entry(line.as_str());
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        console.dispatch(&line);
        // Regaining the prompt is our focus event: defensive re-sync.
        session::focus(&console.store);
    }
    Ok(())
}

fn print_help() {
    println!(
        "Commands:\n  \
         login <username> <password>        authenticate\n  \
         logout                             end the session\n  \
         status | whoami                    current identity and available screens\n  \
         open <screen>                      navigate (dashboard, customers, register, users, analytics, ...)\n  \
         customers [term]                   list customers, optionally filtered server-side\n  \
         customer <id>                      customer details with interactions\n  \
         customer add <field=value ...>     create (firstName, lastName, email, customerType, [phoneNumber])\n  \
         customer edit <id> <field=value..> update a customer\n  \
         customer delete <id>               remove a customer\n  \
         interaction add customerId=<id> interactionType=<t> status=<s> [description=..]\n  \
         interaction edit <id> <field=value ...>\n  \
         interaction delete <id>\n  \
         users                              list accounts\n  \
         user edit <id> <field=value ...>   update an account (username, role)\n  \
         user delete <id>                   remove an account\n  \
         register user username=<u> password=<p> role=<r>\n  \
         analytics                          analyst dashboard\n  \
         help                               this help\n  \
         quit | exit                        leave the console"
    );
}

impl Console {
    fn dispatch(&self, line: &str) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let cmd = tokens[0].to_ascii_lowercase();
        match cmd.as_str() {
            "help" => print_help(),
            "login" => self.cmd_login(&tokens[1..]),
            "logout" => self.cmd_logout(),
            "status" | "whoami" => self.cmd_status(),
            "open" => self.cmd_open(&tokens[1..]),
            "customers" => self.screen_customers(if tokens.len() > 1 { Some(tokens[1..].join(" ")) } else { None }),
            "customer" => self.cmd_customer(&tokens[1..]),
            "interaction" => self.cmd_interaction(&tokens[1..]),
            "users" => self.screen_users(),
            "user" => self.cmd_user(&tokens[1..]),
            "register" => {
                if tokens.get(1).map(|t| t.eq_ignore_ascii_case("user")).unwrap_or(false) {
                    self.cmd_register_user(&tokens[2..]);
                } else {
                    self.screen_customer_add(&tokens[1..]);
                }
            }
            "analytics" => self.screen_analytics(),
            _ => eprintln!("unknown command: {} (try 'help')", tokens[0]),
        }
    }

    // --- navigation guard -------------------------------------------------

    /// Evaluate the target screen's policy against the current session.
    /// Returns true when the screen may render (its title has been printed);
    /// otherwise the login hint or the in-place denial notice has been shown.
    fn gate(&self, screen_name: &str) -> bool {
        let Some(screen) = guard::screen(screen_name) else {
            eprintln!("unknown screen: {}", screen_name);
            return false;
        };
        if self.gate_policy(&screen.policy) {
            println!("{}", screen.title);
            true
        } else {
            false
        }
    }

    fn gate_policy(&self, policy: &crate::guard::AccessPolicy) -> bool {
        match guard::evaluate(&self.store.get(), policy) {
            Access::Permitted => true,
            Access::Unauthenticated => {
                // The destination is discarded, exactly like the web login redirect.
                println!("Please login to continue: login <username> <password>");
                false
            }
            Access::Denied { required, actual } => {
                println!("Access Denied");
                println!("You do not have permission to access this page.");
                println!("Required: {}", required);
                println!("Your role: {}", actual);
                false
            }
        }
    }

    // --- auth -------------------------------------------------------------

    fn cmd_login(&self, args: &[&str]) {
        let (user, pass) = (args.first().copied().unwrap_or(""), args.get(1).copied().unwrap_or(""));
        match self.rt.block_on(auth::login(&self.client, user, pass, self.use_mock)) {
            Ok(session) => {
                println!("Login successful: {} [{}]", session.username.as_deref().unwrap_or(user), session.role);
                self.print_menu(&session);
            }
            Err(e) => eprintln!("{}", login_error_text(&e)),
        }
    }

    fn cmd_logout(&self) {
        match self.rt.block_on(auth::logout(&self.client)) {
            Ok(()) => println!("Logged out."),
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    fn cmd_status(&self) {
        println!("Backend: {}", self.client.origin());
        let s = self.store.get();
        if !s.authenticated() {
            println!("Not logged in.");
            return;
        }
        println!("{} [{}]", s.username.as_deref().unwrap_or("?"), s.role);
        self.print_menu(&s);
    }

    /// The navbar analog: screens the guard would permit right now.
    fn print_menu(&self, session: &Session) {
        let visible: Vec<&str> = guard::SCREENS
            .iter()
            .filter(|sc| guard::evaluate(session, &sc.policy) == Access::Permitted)
            .map(|sc| sc.name)
            .collect();
        println!("Screens: {}", visible.join(", "));
    }

    // --- navigation -------------------------------------------------------

    fn cmd_open(&self, args: &[&str]) {
        let Some(name) = args.first() else {
            eprintln!("usage: open <screen>");
            return;
        };
        match *name {
            "dashboard" => self.screen_dashboard(),
            "customers" => self.screen_customers(None),
            "customer" => eprintln!("usage: customer <id>"),
            "register" | "edit" => {
                if self.gate(name) {
                    println!("Use 'customer add <field=value ...>' / 'customer edit <id> ...' to submit the form.");
                }
            }
            "users" => self.screen_users(),
            "user-register" => {
                if self.gate("user-register") {
                    println!("Use 'register user username=<u> password=<p> role=<r>' to submit the form.");
                }
            }
            "user-edit" => {
                if self.gate("user-edit") {
                    println!("Use 'user edit <id> <field=value ...>' to submit the form.");
                }
            }
            "analytics" => self.screen_analytics(),
            other => eprintln!("unknown screen: {}", other),
        }
    }

    // --- screens ----------------------------------------------------------

    fn screen_dashboard(&self) {
        if !self.gate("dashboard") {
            return;
        }
        let list = match self.rt.block_on(customers::list(&self.client)) {
            Ok(l) => l,
            Err(e) => return self.show_error(&e),
        };
        // Interaction totals are additive; the dashboard still renders if the
        // counts endpoint is unavailable.
        let total_interactions = self
            .rt
            .block_on(interactions::counts(&self.client))
            .ok()
            .and_then(|m| m.get("totalInteractions").copied())
            .unwrap_or(0);

        let mut by_type: BTreeMap<&'static str, usize> = BTreeMap::new();
        for c in &list {
            *by_type.entry(c.customer_type.as_str()).or_insert(0) += 1;
        }
        print_record(&[
            ("Total Customers", list.len().to_string()),
            ("Total Interactions", total_interactions.to_string()),
        ]);
        let rows: Vec<Vec<String>> =
            by_type.iter().map(|(t, n)| vec![t.to_string(), n.to_string()]).collect();
        print_table(&["Customer Type", "Count"], &rows);
    }

    fn screen_customers(&self, term: Option<String>) {
        if !self.gate("customers") {
            return;
        }
        let result = match term.as_deref() {
            Some(t) => self.rt.block_on(customers::search(&self.client, t)),
            None => self.rt.block_on(customers::list(&self.client)),
        };
        match result {
            Ok(list) => {
                let rows: Vec<Vec<String>> = list.iter().map(customer_row).collect();
                print_table(&["ID", "Name", "Email", "Phone", "Type", "Registered"], &rows);
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn screen_customer_details(&self, id: i64) {
        if !self.gate("customer") {
            return;
        }
        match self.rt.block_on(customers::get(&self.client, id)) {
            Ok(c) => {
                println!("Customer #{}", id);
                print_record(&[
                    ("Name", format!("{} {}", c.first_name, c.last_name)),
                    ("Email", c.email.clone()),
                    ("Phone", c.phone_number.clone().unwrap_or_default()),
                    ("Type", c.customer_type.to_string()),
                    ("Registered", c.registration_date.map(|d| d.to_string()).unwrap_or_default()),
                ]);
            }
            Err(e) => return self.show_error(&e),
        }
        match self.rt.block_on(customers::interactions(&self.client, id)) {
            Ok(list) => {
                let rows: Vec<Vec<String>> = list.iter().map(interaction_row).collect();
                print_table(&["ID", "Type", "Status", "Date", "Description"], &rows);
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn screen_customer_add(&self, args: &[&str]) {
        if !self.gate("register") {
            return;
        }
        match parse_customer_form(&parse_kv(args), None) {
            Ok(c) => match self.rt.block_on(customers::create(&self.client, &c)) {
                Ok(created) => println!("Customer created with id {}", created.id.unwrap_or_default()),
                Err(e) => self.show_error(&e),
            },
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    fn screen_customer_edit(&self, id: i64, args: &[&str]) {
        if !self.gate("edit") {
            return;
        }
        let current = match self.rt.block_on(customers::get(&self.client, id)) {
            Ok(c) => c,
            Err(e) => return self.show_error(&e),
        };
        match parse_customer_form(&parse_kv(args), Some(current)) {
            Ok(c) => match self.rt.block_on(customers::update(&self.client, id, &c)) {
                Ok(_) => println!("Customer {} updated.", id),
                Err(e) => self.show_error(&e),
            },
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    fn screen_users(&self) {
        if !self.gate("users") {
            return;
        }
        match self.rt.block_on(users::list(&self.client)) {
            Ok(list) => {
                let rows: Vec<Vec<String>> = list
                    .iter()
                    .map(|u| vec![u.id.to_string(), u.username.clone(), u.role.to_string()])
                    .collect();
                print_table(&["ID", "Username", "Role"], &rows);
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn screen_analytics(&self) {
        if !self.gate("analytics") {
            return;
        }
        match self.rt.block_on(analytics::customer_stats(&self.client)) {
            Ok(stats) => {
                println!("Customer Statistics");
                print_record(&[("Total Customers", stats.total_customers.to_string())]);
                let rows: Vec<Vec<String>> =
                    stats.customers_by_status.iter().map(|(k, v)| vec![k.clone(), v.to_string()]).collect();
                print_table(&["Customer Type", "Count"], &rows);
            }
            Err(e) => return self.show_error(&e),
        }
        if let Ok(stats) = self.rt.block_on(analytics::interaction_stats(&self.client)) {
            println!("Interaction Statistics");
            print_record(&[
                ("Total Interactions", stats.total_interactions.to_string()),
                ("Avg per Customer", format!("{:.2}", stats.avg_interactions_per_customer)),
            ]);
            let rows: Vec<Vec<String>> =
                stats.interactions_by_type.iter().map(|(k, v)| vec![k.clone(), v.to_string()]).collect();
            print_table(&["Interaction Type", "Count"], &rows);
        }
        if let Ok(monthly) = self.rt.block_on(analytics::monthly_interactions(&self.client)) {
            println!("Monthly Interactions");
            let rows: Vec<Vec<String>> = MONTHS
                .iter()
                .map(|m| vec![m.to_string(), monthly.get(*m).copied().unwrap_or(0).to_string()])
                .collect();
            print_table(&["Month", "Interactions"], &rows);
        }
    }

    // --- customer / interaction / user commands ---------------------------

    fn cmd_customer(&self, args: &[&str]) {
        match args.first().copied() {
            Some("add") => self.screen_customer_add(&args[1..]),
            Some("edit") => match parse_id(args.get(1).copied()) {
                Ok(id) => self.screen_customer_edit(id, &args[2..]),
                Err(e) => eprintln!("{}", e.user_message()),
            },
            Some("delete") => match parse_id(args.get(1).copied()) {
                Ok(id) => {
                    // Delete is an admin affordance on the list screen.
                    if self.gate_policy(&ADMIN_ONLY) {
                        match self.rt.block_on(customers::delete(&self.client, id)) {
                            Ok(()) => println!("Customer {} deleted.", id),
                            Err(e) => self.show_error(&e),
                        }
                    }
                }
                Err(e) => eprintln!("{}", e.user_message()),
            },
            Some(idish) => match parse_id(Some(idish)) {
                Ok(id) => self.screen_customer_details(id),
                Err(e) => eprintln!("{}", e.user_message()),
            },
            None => eprintln!("usage: customer <id> | customer add|edit|delete ..."),
        }
    }

    fn cmd_interaction(&self, args: &[&str]) {
        // Interaction forms live inside the customer details page: any
        // authenticated role may use them.
        if !self.gate_policy(&OPEN) {
            return;
        }
        match args.first().copied() {
            Some("add") => {
                let form = parse_kv(&args[1..]);
                match parse_interaction_form(&form, None) {
                    Ok(i) => match self.rt.block_on(interactions::create(&self.client, &i)) {
                        Ok(created) => println!("Interaction created with id {}", created.id.unwrap_or_default()),
                        Err(e) => self.show_error(&e),
                    },
                    Err(e) => eprintln!("{}", e.user_message()),
                }
            }
            Some("edit") => match parse_id(args.get(1).copied()) {
                Ok(id) => {
                    let current = match self.rt.block_on(interactions::get(&self.client, id)) {
                        Ok(i) => i,
                        Err(e) => return self.show_error(&e),
                    };
                    match parse_interaction_form(&parse_kv(&args[2..]), Some(current)) {
                        Ok(i) => match self.rt.block_on(interactions::update(&self.client, id, &i)) {
                            Ok(_) => println!("Interaction {} updated.", id),
                            Err(e) => self.show_error(&e),
                        },
                        Err(e) => eprintln!("{}", e.user_message()),
                    }
                }
                Err(e) => eprintln!("{}", e.user_message()),
            },
            Some("delete") => match parse_id(args.get(1).copied()) {
                Ok(id) => match self.rt.block_on(interactions::delete(&self.client, id)) {
                    Ok(()) => println!("Interaction {} deleted.", id),
                    Err(e) => self.show_error(&e),
                },
                Err(e) => eprintln!("{}", e.user_message()),
            },
            _ => eprintln!("usage: interaction add|edit|delete ..."),
        }
    }

    fn cmd_user(&self, args: &[&str]) {
        match args.first().copied() {
            Some("edit") => {
                if !self.gate("user-edit") {
                    return;
                }
                match parse_id(args.get(1).copied()) {
                    Ok(id) => {
                        let current = match self.rt.block_on(users::get(&self.client, id)) {
                            Ok(u) => u,
                            Err(e) => return self.show_error(&e),
                        };
                        let form = parse_kv(&args[2..]);
                        let username = form.get("username").cloned().unwrap_or(current.username);
                        let role = match form.get("role") {
                            Some(r) => match parse_role(r) {
                                Ok(role) => role,
                                Err(e) => return eprintln!("{}", e.user_message()),
                            },
                            None => current.role,
                        };
                        match self.rt.block_on(users::update(&self.client, id, &username, role)) {
                            Ok(_) => println!("User {} updated.", id),
                            Err(e) => self.show_error(&e),
                        }
                    }
                    Err(e) => eprintln!("{}", e.user_message()),
                }
            }
            Some("delete") => {
                if !self.gate("users") {
                    return;
                }
                match parse_id(args.get(1).copied()) {
                    Ok(id) => match self.rt.block_on(users::delete(&self.client, id)) {
                        Ok(()) => println!("User {} deleted.", id),
                        Err(e) => self.show_error(&e),
                    },
                    Err(e) => eprintln!("{}", e.user_message()),
                }
            }
            _ => eprintln!("usage: user edit <id> <field=value ...> | user delete <id>"),
        }
    }

    fn cmd_register_user(&self, args: &[&str]) {
        if !self.gate("user-register") {
            return;
        }
        let form = parse_kv(args);
        let result = (|| -> ApiResult<(String, String, Role)> {
            let username = validate::required("username", "Username", form.get("username").map(|s| s.as_str()))?;
            let password = validate::required("password", "Password", form.get("password").map(|s| s.as_str()))?;
            let role = parse_role(&validate::required("role", "Role", form.get("role").map(|s| s.as_str()))?)?;
            Ok((username, password, role))
        })();
        match result {
            Ok((username, password, role)) => {
                match self.rt.block_on(auth::register(&self.client, &username, &password, role)) {
                    Ok(account) => println!("User '{}' registered with role {}.", account.username, account.role),
                    Err(e) => self.show_error(&e),
                }
            }
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    // --- shared rendering -------------------------------------------------

    fn show_error(&self, e: &ApiError) {
        eprintln!("{}", e.user_message());
        // A 401 already cleared the store; the chrome catches up on the next
        // pulse and the prompt drops back to anonymous.
        if e.requires_login() {
            println!("Please login to continue: login <username> <password>");
        }
    }
}

fn login_error_text(e: &ApiError) -> String {
    match e {
        ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } => "Invalid username or password".to_string(),
        ApiError::Network { .. } => "Network error. Please check your connection and try again.".to_string(),
        ApiError::Input { .. } => e.user_message(),
        _ => "Login failed. Please try again.".to_string(),
    }
}

fn customer_row(c: &Customer) -> Vec<String> {
    vec![
        c.id.map(|i| i.to_string()).unwrap_or_default(),
        format!("{} {}", c.first_name, c.last_name),
        c.email.clone(),
        c.phone_number.clone().unwrap_or_default(),
        c.customer_type.to_string(),
        c.registration_date.map(|d| d.to_string()).unwrap_or_default(),
    ]
}

fn interaction_row(i: &Interaction) -> Vec<String> {
    vec![
        i.id.map(|x| x.to_string()).unwrap_or_default(),
        i.interaction_type.to_string(),
        i.status.to_string(),
        i.interaction_date.map(|d| d.to_string()).unwrap_or_default(),
        i.description.clone().unwrap_or_default(),
    ]
}

fn parse_kv(tokens: &[&str]) -> BTreeMap<String, String> {
    tokens
        .iter()
        .filter_map(|t| t.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn parse_id(s: Option<&str>) -> ApiResult<i64> {
    s.and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| ApiError::input("id", "A numeric id is required"))
}

fn parse_role(s: &str) -> ApiResult<Role> {
    match Role::parse(s) {
        Role::Unset => Err(ApiError::input("role", "Role must be one of ADMIN, SALES_REP, ANALYST, USER")),
        role => Ok(role),
    }
}

/// Build a customer from form fields, validating like the registration form.
/// With a base record, provided fields override it; without one every
/// required field must be present.
fn parse_customer_form(form: &BTreeMap<String, String>, base: Option<Customer>) -> ApiResult<Customer> {
    let field = |name: &str| form.get(name).map(|s| s.as_str());
    let (id, registration_date) = match &base {
        Some(b) => (b.id, b.registration_date),
        None => (None, None),
    };
    let first_name = match (field("firstName"), &base) {
        (Some(_), _) | (None, None) => validate::required("firstName", "First name", field("firstName"))?,
        (None, Some(b)) => b.first_name.clone(),
    };
    let last_name = match (field("lastName"), &base) {
        (Some(_), _) | (None, None) => validate::required("lastName", "Last name", field("lastName"))?,
        (None, Some(b)) => b.last_name.clone(),
    };
    let email = match (field("email"), &base) {
        (Some(_), _) | (None, None) => {
            let e = validate::required("email", "Email", field("email"))?;
            validate::email_format(&e)?;
            e
        }
        (None, Some(b)) => b.email.clone(),
    };
    let customer_type = match (field("customerType"), &base) {
        (Some(_), _) | (None, None) => {
            let raw = validate::required("customerType", "Customer type", field("customerType"))?;
            CustomerType::parse(&raw)
                .ok_or_else(|| ApiError::input("customerType", "Customer type must be one of REGULAR, PREMIUM, VIP"))?
        }
        (None, Some(b)) => b.customer_type,
    };
    let phone_number = field("phoneNumber")
        .map(|s| s.to_string())
        .or_else(|| base.as_ref().and_then(|b| b.phone_number.clone()));
    Ok(Customer { id, first_name, last_name, email, phone_number, customer_type, registration_date })
}

/// Build an interaction from form fields, validating like the add form.
fn parse_interaction_form(form: &BTreeMap<String, String>, base: Option<Interaction>) -> ApiResult<Interaction> {
    let field = |name: &str| form.get(name).map(|s| s.as_str());
    let customer_id = match (field("customerId"), &base) {
        (Some(raw), _) => raw
            .parse::<i64>()
            .map_err(|_| ApiError::input("customerId", "A numeric customerId is required"))?,
        (None, Some(b)) => b.customer_id,
        (None, None) => return Err(ApiError::input("customerId", "A numeric customerId is required")),
    };
    let interaction_type = match (field("interactionType"), &base) {
        (Some(_), _) | (None, None) => {
            let raw = validate::required("interactionType", "Interaction type", field("interactionType"))?;
            InteractionType::parse(&raw).ok_or_else(|| {
                ApiError::input(
                    "interactionType",
                    "Interaction type must be one of PURCHASE, INQUIRY, SUPPORT, COMPLAINT",
                )
            })?
        }
        (None, Some(b)) => b.interaction_type,
    };
    let status = match (field("status"), &base) {
        (Some(_), _) | (None, None) => {
            let raw = validate::required("status", "Status", field("status"))?;
            InteractionStatus::parse(&raw)
                .ok_or_else(|| ApiError::input("status", "Status must be one of OPEN, CLOSED, PENDING"))?
        }
        (None, Some(b)) => b.status,
    };
    let description = field("description")
        .map(|s| s.to_string())
        .or_else(|| base.as_ref().and_then(|b| b.description.clone()));
    let (id, interaction_date) = match &base {
        Some(b) => (b.id, b.interaction_date),
        None => (None, None),
    };
    Ok(Interaction { id, customer_id, interaction_type, description, status, interaction_date })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn customer_form_requires_all_fields_without_base() {
        let f = form(&[("firstName", "Jane"), ("lastName", "Doe"), ("email", "j@d.co")]);
        let err = parse_customer_form(&f, None).unwrap_err();
        assert_eq!(err.message(), "Customer type is required");
    }

    #[test]
    fn customer_form_rejects_bad_email_before_any_network_call() {
        let f = form(&[
            ("firstName", "Jane"),
            ("lastName", "Doe"),
            ("email", "nope"),
            ("customerType", "VIP"),
        ]);
        let err = parse_customer_form(&f, None).unwrap_err();
        assert_eq!(err.message(), "Invalid email format");
    }

    #[test]
    fn customer_form_overrides_base_fields() {
        let base = Customer {
            id: Some(4),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "j@d.co".into(),
            phone_number: Some("555".into()),
            customer_type: CustomerType::Regular,
            registration_date: None,
        };
        let c = parse_customer_form(&form(&[("customerType", "VIP")]), Some(base)).unwrap();
        assert_eq!(c.customer_type, CustomerType::Vip);
        assert_eq!(c.first_name, "Jane");
        assert_eq!(c.id, Some(4));
    }

    #[test]
    fn interaction_form_validates_enums() {
        let f = form(&[("customerId", "3"), ("interactionType", "CHAT"), ("status", "OPEN")]);
        let err = parse_interaction_form(&f, None).unwrap_err();
        assert!(err.message().contains("PURCHASE"));
    }

    #[test]
    fn id_and_role_parsing() {
        assert!(parse_id(Some("12")).is_ok());
        assert!(parse_id(Some("x")).is_err());
        assert!(parse_id(None).is_err());
        assert_eq!(parse_role("ANALYST").unwrap(), Role::Analyst);
        assert!(parse_role("MANAGER").is_err());
    }

    #[test]
    fn kv_parsing_ignores_bare_tokens() {
        let m = parse_kv(&["a=1", "junk", "b=two words?no"]);
        assert_eq!(m.get("a").unwrap(), "1");
        assert_eq!(m.get("b").unwrap(), "two words?no");
        assert_eq!(m.len(), 2);
    }
}
