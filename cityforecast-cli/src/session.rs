use std::io::Write;

use cityforecast_core::{CityCandidate, DailyForecast, Error, WeatherProvider};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// The interactive lookup loop, generic over its line input and text output
/// so tests can drive it with scripted bytes instead of a terminal.
pub struct Session<R, W> {
    provider: Box<dyn WeatherProvider>,
    input: R,
    output: W,
}

/// Where the loop currently stands. Each `step` consumes one state and
/// yields the next, or `None` once the input is exhausted.
#[derive(Debug)]
enum State {
    AwaitingQuery,
    Resolving { query: String },
    Disambiguating { matches: Vec<CityCandidate> },
    FetchingForecast { city: CityCandidate },
    Displaying { city: CityCandidate, days: Vec<DailyForecast> },
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(provider: Box<dyn WeatherProvider>, input: R, output: W) -> Self {
        Self { provider, input, output }
    }

    /// Run until the input runs dry. Recoverable faults print their message
    /// and return to the city prompt; terminal I/O faults propagate.
    pub async fn run(&mut self) -> Result<(), Error> {
        let mut state = State::AwaitingQuery;
        loop {
            match self.step(state).await {
                Ok(Some(next)) => state = next,
                Ok(None) => return Ok(()),
                Err(err) if err.is_recoverable() => {
                    writeln!(self.output, "{err}")?;
                    state = State::AwaitingQuery;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn step(&mut self, state: State) -> Result<Option<State>, Error> {
        match state {
            State::AwaitingQuery => {
                write!(self.output, "City?\n> ")?;
                self.output.flush()?;
                Ok(self.read_line().await?.map(|query| State::Resolving { query }))
            }

            State::Resolving { query } => {
                let mut matches = self.provider.resolve(&query).await?;
                debug!(candidates = matches.len(), "resolution complete");
                match matches.len() {
                    0 => {
                        writeln!(self.output, "No city found for that query, please try again.")?;
                        Ok(Some(State::AwaitingQuery))
                    }
                    1 => Ok(Some(State::FetchingForecast { city: matches.remove(0) })),
                    _ => Ok(Some(State::Disambiguating { matches })),
                }
            }

            State::Disambiguating { mut matches } => {
                let Some(index) = self.choose_index(&matches).await? else {
                    return Ok(None);
                };
                Ok(Some(State::FetchingForecast { city: matches.swap_remove(index) }))
            }

            State::FetchingForecast { city } => {
                let days = self.provider.forecast(city.latitude, city.longitude).await?;
                Ok(Some(State::Displaying { city, days }))
            }

            State::Displaying { city, days } => {
                if days.is_empty() {
                    writeln!(self.output, "No forecast data found for {}.", city.name)?;
                } else {
                    writeln!(self.output, "Here's the weather in {}:", city.name)?;
                    for day in &days {
                        writeln!(self.output, "{day}")?;
                    }
                }
                Ok(Some(State::AwaitingQuery))
            }
        }
    }

    /// Present the enumerated candidates and read selections until one is a
    /// valid 1-based index. Returns `None` when the input ends first.
    async fn choose_index(&mut self, matches: &[CityCandidate]) -> Result<Option<usize>, Error> {
        writeln!(self.output, "Multiple matches found:")?;
        for (position, city) in matches.iter().enumerate() {
            writeln!(self.output, "{}. {}", position + 1, city.label())?;
        }

        loop {
            write!(self.output, "Which city did you mean? Enter index:\n> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            if let Ok(choice) = line.trim().parse::<usize>() {
                if (1..=matches.len()).contains(&choice) {
                    return Ok(Some(choice - 1));
                }
            }
            writeln!(
                self.output,
                "Invalid choice, please enter a valid number from the list above."
            )?;
        }
    }

    /// One line of input, without its trailing newline. `None` on EOF.
    async fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
