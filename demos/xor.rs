use strata::f;
use strata::{ClassSample, NetError, Network, SamplesSet};

fn main() -> Result<(), NetError> {
    tracing_subscriber::fmt::init();

    let mut set = SamplesSet::new();
    for _ in 0..250 {
        set.insert(ClassSample::of_class(vec![0., 0.], 0, 2));
        set.insert(ClassSample::of_class(vec![0., 1.], 1, 2));
        set.insert(ClassSample::of_class(vec![1., 0.], 1, 2));
        set.insert(ClassSample::of_class(vec![1., 1.], 0, 2));
    }

    let mut net = Network::new(vec![2, 4, 2])?;
    let mut trainer = net.get_trainer();
    trainer.set_learning_rate(0.5).on_progress(|p| {
        println!(
            "{:>5.1}% complete, accuracy {:.3}, elapsed {:?}",
            p.complete * 100.,
            p.accuracy,
            p.elapsed
        );
    });
    let accuracy = trainer.train_on_set(&mut set, 30, 0.05)?;
    println!("final accuracy: {:.3}", accuracy);

    for (a, b) in [(0., 0.), (0., 1.), (1., 0.), (1., 1.)] {
        let out = net.forward(&[a, b])?.to_vec();
        println!("{} xor {} -> class {}", a, b, f::argmax(&out));
    }

    Ok(())
}
