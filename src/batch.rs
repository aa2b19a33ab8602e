// Krucvorto – A crossword generator
// Copyright (C) 2025  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::collections::VecDeque;
use std::sync::{Arc, mpsc, Mutex};
use std::thread;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use super::crossword::Crossword;
use super::error::Error;

pub type BatchResult = Result<(Crossword, u32), Error>;

/// Iterator that computes several independent crosswords from the
/// same word list
pub struct Batch<'a, R: ?Sized> {
    template: &'a Crossword,
    remaining: usize,
    rng: &'a mut R,
}

struct JobQueue {
    data: Mutex<JobQueueData>,
}

struct JobQueueData {
    next_job_num: usize,
    seeds: VecDeque<u64>,
}

impl<'a, R: Rng + ?Sized> Batch<'a, R> {
    pub fn new(
        template: &'a Crossword,
        count: usize,
        rng: &'a mut R,
    ) -> Batch<'a, R> {
        Batch { template, remaining: count, rng }
    }
}

impl<'a, R: Rng + ?Sized> Iterator for Batch<'a, R> {
    type Item = BatchResult;

    fn next(&mut self) -> Option<BatchResult> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;

        let mut crossword = self.template.clone();

        Some(crossword.compute(&mut *self.rng).map(|score| (crossword, score)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl JobQueue {
    fn new(seeds: VecDeque<u64>) -> JobQueue {
        JobQueue {
            data: Mutex::new(JobQueueData {
                next_job_num: 0,
                seeds,
            })
        }
    }

    fn next(&self) -> Option<(usize, u64)> {
        let mut data = self.data.lock().unwrap();

        data.seeds
            .pop_front()
            .map(|seed| {
                let job_num = data.next_job_num;
                data.next_job_num += 1;
                (job_num, seed)
            })
    }
}

pub fn available_threads() -> usize {
    thread::available_parallelism()
        .unwrap_or(std::num::NonZeroUsize::MIN)
        .into()
}

fn run_jobs(
    template: &Crossword,
    queue: &JobQueue,
    tx: mpsc::Sender<(usize, BatchResult)>,
) -> Result<(), mpsc::SendError<(usize, BatchResult)>> {
    while let Some((job_num, seed)) = queue.next() {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut crossword = template.clone();
        let result = crossword.compute(&mut rng)
            .map(|score| (crossword, score));

        tx.send((job_num, result))?;
    }

    Ok(())
}

/// Computes `count` crosswords spread over several threads. Each one
/// gets its own generator seeded from `rng` so the results don’t
/// depend on the number of threads. The results are in job order.
pub fn generate_parallel<R: Rng + ?Sized>(
    template: &Crossword,
    count: usize,
    n_threads: usize,
    rng: &mut R,
) -> Vec<BatchResult> {
    let seeds = (0..count).map(|_| rng.gen::<u64>()).collect::<VecDeque<_>>();
    let queue = Arc::new(JobQueue::new(seeds));
    let template = Arc::new(template.clone());

    let (tx, rx) = mpsc::channel();
    let n_threads = n_threads.clamp(1, count.max(1));

    let handles = (0..n_threads).map(|_| {
        let queue = Arc::clone(&queue);
        let template = Arc::clone(&template);
        let tx = tx.clone();

        thread::spawn(move || run_jobs(&template, &queue, tx))
    }).collect::<Vec<_>>();

    std::mem::drop(tx);

    let mut results = (0..count).map(|_| None).collect::<Vec<_>>();

    for (job_num, result) in rx {
        log::debug!("finished crossword {}", job_num + 1);
        results[job_num] = Some(result);
    }

    for handle in handles {
        if let Err(e) = handle.join() {
            std::panic::resume_unwind(e);
        }
    }

    results.into_iter().flatten().collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::config::Config;

    const WORDS: [(&str, &str); 6] = [
        ("rust", "Iron oxide"),
        ("borrow", "Take for a while"),
        ("trait", "Characteristic"),
        ("crate", "Wooden box"),
        ("thread", "Sewing strand"),
        ("lifetime", "Span of existence"),
    ];

    fn summary(results: &[BatchResult]) -> Vec<(Vec<String>, u32)> {
        results.iter()
            .map(|result| {
                let (crossword, score) = result.as_ref().unwrap();
                (crossword.grid().row_strings('.'), *score)
            })
            .collect()
    }

    #[test]
    fn sequential() {
        let template = Crossword::new(Config::default(), WORDS).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let batch = Batch::new(&template, 4, &mut rng);

        assert_eq!(batch.size_hint(), (4, Some(4)));

        let results = batch.collect::<Vec<_>>();

        assert_eq!(results.len(), 4);

        for result in results.iter() {
            let (crossword, score) = result.as_ref().unwrap();

            assert_eq!(crossword.score(), Some(*score));
            assert_eq!(crossword.counter(), 3);
            assert!(crossword.n_placed() >= 1);
        }

        // The template itself isn’t touched
        assert_eq!(template.counter(), 0);
        assert_eq!(template.n_placed(), 0);
    }

    #[test]
    fn parallel_matches_single_thread() {
        let template = Crossword::new(Config::default(), WORDS).unwrap();

        let mut rng = StdRng::seed_from_u64(21);
        let single = generate_parallel(&template, 6, 1, &mut rng);

        let mut rng = StdRng::seed_from_u64(21);
        let multiple = generate_parallel(&template, 6, 4, &mut rng);

        assert_eq!(single.len(), 6);
        assert_eq!(summary(&single), summary(&multiple));
    }

    #[test]
    fn parallel_errors() {
        let config = Config {
            cols: "3".parse().unwrap(),
            rows: "3".parse().unwrap(),
            ..Config::default()
        };
        let template = Crossword::new(config, WORDS).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let results = generate_parallel(&template, 3, 2, &mut rng);

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|result| {
            matches!(result, Err(Error::MaxLoop { word: Some(_), .. }))
        }));
    }

    #[test]
    fn one_result_per_job() {
        let template = Crossword::new(Config::default(), WORDS).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        for count in 1..=5 {
            for n_threads in [1, 2, 8] {
                let results = generate_parallel(
                    &template,
                    count,
                    n_threads,
                    &mut rng,
                );

                assert_eq!(results.len(), count);
                assert!(results.iter().all(Result::is_ok));
            }
        }
    }

    #[test]
    fn no_jobs() {
        let template = Crossword::new(Config::default(), WORDS).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(generate_parallel(&template, 0, 4, &mut rng).is_empty());
        assert!(available_threads() >= 1);
    }
}
