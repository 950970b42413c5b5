use rand::{thread_rng, Rng};
use strata::{ClassSample, NetError, Network, SamplesSet};

fn gen_sample(rng: &mut impl Rng) -> ClassSample {
    let class = rng.gen_range(0..2usize);
    let (cx, cy) = if class == 0 { (0.2, 0.2) } else { (0.8, 0.8) };
    let x = cx + rng.gen_range(-0.15..0.15);
    let y = cy + rng.gen_range(-0.15..0.15);
    ClassSample::of_class(vec![x, y], class, 2)
}

fn main() -> Result<(), NetError> {
    tracing_subscriber::fmt::init();
    let mut rng = thread_rng();

    let mut train = SamplesSet::new();
    for _ in 0..2000 {
        train.insert(gen_sample(&mut rng));
    }
    let mut test = SamplesSet::new();
    for _ in 0..200 {
        test.insert(gen_sample(&mut rng));
    }

    let mut net = Network::new(vec![2, 6, 2])?;
    let mut trainer = net.get_trainer();
    trainer.set_learning_rate(0.1);
    let accuracy = trainer.train_on_set(&mut train, 10, 0.05)?;
    println!("train accuracy: {:.3}", accuracy);

    let held_out = net.get_trainer().evaluate(&mut test)?;
    println!("held-out accuracy: {:.3}", held_out);

    Ok(())
}
