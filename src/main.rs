use std::process::ExitCode;

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skyfare_client::{
    config::Config,
    entities::flight::FlightSummary,
    handlers::{
        auth::{LoginForm, SignupForm},
        booking::{booking_stats, BookingConfirmationView, BookingHistoryView},
        details::{FlightDetailsView, PassengerForm},
        results::ResultsView,
        search::SearchForm,
    },
    utils::{
        format::{format_duration, format_money},
        query::SortOption,
        ticket::FileTicketWriter,
    },
    AppError, AppResult, AppState,
};

const USAGE: &str = "\
Usage:
  skyfare-client search <from> <to> <YYYY-MM-DD> [passengers] [sort] [page]
  skyfare-client book <from> <to> <YYYY-MM-DD> <passengers> <flight-id> <name> <email> <phone> --agree-terms
  skyfare-client booking <id> [--ticket]
  skyfare-client history
  skyfare-client register <name> <email> <password>
  skyfare-client login <email> <password>";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Validation(msg)) if msg == USAGE => {
            eprintln!("{}", USAGE);
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> AppResult<()> {
    let command = args.first().map(String::as_str).unwrap_or_default();
    let rest = args.get(1..).unwrap_or_default();

    let config = Config::from_env()?;
    let mut state = AppState::new(config)?;

    match (command, rest) {
        ("search", [from, to, date, tail @ ..]) if tail.len() <= 3 => {
            let passengers = tail.first().map(|p| parse_arg(p, "passengers")).transpose()?;
            let sort = tail.get(1).map(|s| s.parse::<SortOption>()).transpose()?;
            let page = tail.get(2).map(|p| parse_arg(p, "page")).transpose()?;
            search(&state, from, to, date, passengers.unwrap_or(1), sort, page).await
        }
        ("book", [from, to, date, passengers, flight_id, name, email, phone, tail @ ..])
            if tail.len() <= 1 =>
        {
            let passengers = parse_arg(passengers, "passengers")?;
            let flight_id = parse_arg(flight_id, "flight-id")?;
            let agree_terms = tail.first().is_some_and(|flag| flag == "--agree-terms");
            let form = PassengerForm::new(name, email, phone, agree_terms);
            book(&mut state, from, to, date, passengers, flight_id, form).await
        }
        ("booking", [id]) => show_booking(&state, parse_arg(id, "id")?, false).await,
        ("booking", [id, flag]) if flag == "--ticket" => {
            show_booking(&state, parse_arg(id, "id")?, true).await
        }
        ("history", []) => history(&mut state).await,
        ("register", [name, email, password]) => {
            let form = SignupForm {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                agree_terms: true,
            };
            println!("Password strength: {} ({:?})", form.strength(), form.strength_label());
            form.submit(&state.client).await?;
            println!("Signup successful. You can now log in.");
            Ok(())
        }
        ("login", [email, password]) => {
            let form = LoginForm {
                email: email.clone(),
                password: password.clone(),
                password_visible: false,
            };
            let user = form.submit(&mut state).await?;
            if let Some(user) = user {
                println!("Welcome back, {}", user.name);
            }
            if let Some(token) = state.client.token() {
                println!("API_TOKEN={}", token);
            }
            Ok(())
        }
        _ => Err(AppError::Validation(USAGE.to_string())),
    }
}

fn parse_arg<T: std::str::FromStr>(raw: &str, name: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("Invalid {}: {}", name, raw)))
}

fn search_form(from: &str, to: &str, date: &str, passengers: u8) -> AppResult<SearchForm> {
    let mut form = SearchForm::default();
    form.from = from.to_string();
    form.to = to.to_string();
    form.date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", date)))?;
    form.passengers = passengers;
    Ok(form)
}

async fn search(
    state: &AppState,
    from: &str,
    to: &str,
    date: &str,
    passengers: u8,
    sort: Option<SortOption>,
    page: Option<u32>,
) -> AppResult<()> {
    let criteria = search_form(from, to, date, passengers)?.submit()?;
    let mut view = ResultsView::new(criteria, state.config.results_page_size);
    view.refresh(&state.client).await?;

    if let Some(sort) = sort {
        let pending = view.set_sort(sort)?;
        let result = state.client.search_flights(&pending.query).await;
        view.apply(pending.ticket, result);
    }
    if let Some(page) = page.filter(|p| *p != 1) {
        let pending = view.go_to_page(page)?;
        let result = state.client.search_flights(&pending.query).await;
        view.apply(pending.ticket, result);
    }

    if let Some(error) = view.error() {
        return Err(AppError::Network(error.to_string()));
    }

    println!(
        "{} flights found · Page {} of {}",
        view.total(),
        view.current_page(),
        view.total_pages()
    );
    for flight in view.flights() {
        print_flight(flight, passengers, &state.config.currency_symbol);
    }
    let airlines = view.available_airlines();
    if !airlines.is_empty() {
        println!("Airlines: {}", airlines.join(", "));
    }
    Ok(())
}

fn print_flight(flight: &FlightSummary, passengers: u8, symbol: &str) {
    println!(
        "#{:<5} {:<16} {:<8} {} → {}  {}  {:>10}  ({} × {})",
        flight.id,
        flight.airline_name,
        flight.flight_number,
        flight.departure_time.format("%H:%M"),
        flight.arrival_time.format("%H:%M"),
        format_duration(flight.duration_minutes),
        format_money(flight.price_for(passengers), symbol),
        passengers,
        format_money(flight.price, symbol),
    );
}

async fn book(
    state: &mut AppState,
    from: &str,
    to: &str,
    date: &str,
    passengers: u8,
    flight_id: i64,
    form: PassengerForm,
) -> AppResult<()> {
    let criteria = search_form(from, to, date, passengers)?.submit()?;
    let mut results = ResultsView::new(criteria, state.config.results_page_size);
    results.refresh(&state.client).await?;
    if let Some(error) = results.error() {
        return Err(AppError::Network(error.to_string()));
    }
    results.select_flight(state, flight_id)?;

    let mut details = FlightDetailsView::open(state)?;
    details.form = form;

    let symbol = state.config.currency_symbol.clone();
    let fare = &details.fare;
    println!("Base fare ({} × {}): {}", passengers, format_money(fare.base_price, &symbol), format_money(fare.base_fare, &symbol));
    println!("Taxes & fees (18%):  {}", format_money(fare.display_tax(), &symbol));
    println!("Convenience fee:     {}", format_money(fare.convenience_fee, &symbol));
    println!("Total:               {}", format_money(fare.display_total(), &symbol));

    let booking = details.submit(state).await?;
    println!(
        "Booking {} {} · charged {}",
        booking.id,
        booking.status,
        format_money(booking.total_amount, &symbol)
    );
    Ok(())
}

async fn show_booking(state: &AppState, booking_id: i64, export: bool) -> AppResult<()> {
    let mut view = BookingConfirmationView::default();
    view.load(&state.client, booking_id).await?;

    if let Some(booking) = &view.booking {
        println!(
            "Booking {} · {} · {} {} → {} · {} traveller(s) · {}",
            booking.id,
            booking.status,
            booking.flight.flight_number,
            booking.flight.origin_city,
            booking.flight.destination_city,
            booking.passenger_count,
            format_money(booking.total_amount, &state.config.currency_symbol)
        );
    }

    if export {
        let writer = FileTicketWriter::new(&state.config.ticket_dir);
        match view.export_ticket(&writer, &state.config.currency_symbol) {
            Ok(path) => println!("Ticket saved to {}", path.display()),
            Err(e) => eprintln!("Error downloading ticket: {}", e.user_message()),
        }
    }
    Ok(())
}

async fn history(state: &mut AppState) -> AppResult<()> {
    let mut view = BookingHistoryView::default();
    view.load(state).await?;

    let stats = booking_stats(&state.bookings);
    println!(
        "{} bookings · {} confirmed · {} pending",
        stats.total, stats.confirmed, stats.pending
    );
    for booking in &state.bookings {
        println!(
            "#{:<6} {:<10} {} {} → {}  {}  {}",
            booking.id,
            booking.status,
            booking.flight.airline_name,
            booking.flight.origin_city,
            booking.flight.destination_city,
            booking.flight.departure_time.format("%d %b %Y %H:%M"),
            booking.passenger_name
        );
    }
    Ok(())
}
