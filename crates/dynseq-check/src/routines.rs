use dynseq::{DynSeq, SeqError};

use dynseq_log::debug;

use crate::error::{Result, ensure};

pub struct Routine {
    pub name: &'static str,
    pub run: fn() -> Result<()>,
}

pub fn all() -> dynseq::Result<DynSeq<Routine>> {
    let mut routines = DynSeq::new();
    routines.push(Routine { name: "push_back", run: push_back })?;
    routines.push(Routine { name: "pop_back", run: pop_back })?;
    routines.push(Routine { name: "index", run: index })?;
    routines.push(Routine { name: "iteration", run: iteration })?;
    routines.push(Routine { name: "clear", run: clear })?;
    routines.push(Routine { name: "copy", run: copy })?;
    routines.push(Routine { name: "move", run: move_out })?;
    routines.push(Routine { name: "growth", run: growth })?;
    Ok(routines)
}

fn push_back() -> Result<()> {
    let mut seq = DynSeq::new();
    seq.push(10)?;
    seq.push(20)?;
    seq.push(30)?;
    ensure(seq.len() == 3, "wrong size")?;
    ensure(*seq.at(0)? == 10 && *seq.at(1)? == 20 && *seq.at(2)? == 30, "wrong values")
}

fn pop_back() -> Result<()> {
    let mut seq = DynSeq::new();
    seq.push(10)?;
    seq.push(20)?;
    seq.pop_back()?;
    ensure(seq.len() == 1 && *seq.at(0)? == 10, "wrong state after pop")?;
    seq.pop_back()?;
    match seq.pop_back() {
        Err(SeqError::Empty) => Ok(()),
        _ => ensure(false, "popping an empty sequence did not report out of range"),
    }
}

fn index() -> Result<()> {
    let mut seq = DynSeq::new();
    seq.push(10)?;
    seq.push(20)?;
    *seq.at_mut(0)? = 100;
    ensure(*seq.at(0)? == 100 && *seq.at(1)? == 20, "write through index was lost")?;
    match seq.at_mut(10) {
        Err(err) if err.is_out_of_range() => Ok(()),
        _ => ensure(false, "index past the end did not report out of range"),
    }
}

fn iteration() -> Result<()> {
    let mut seq = DynSeq::new();
    seq.push(1)?;
    seq.push(2)?;
    seq.push(3)?;
    let mut sum = 0;
    for value in &seq {
        sum += *value;
    }
    ensure(sum == 6, "iteration sum was not 6")
}

fn clear() -> Result<()> {
    let mut seq = DynSeq::new();
    seq.push(1)?;
    seq.push(2)?;
    seq.clear();
    ensure(seq.is_empty() && seq.len() == 0, "clear left values behind")
}

fn copy() -> Result<()> {
    let mut v1 = DynSeq::new();
    v1.push(1)?;
    v1.push(2)?;
    let v2 = v1.try_clone()?;
    ensure(v2.len() == 2 && *v2.at(0)? == 1 && *v2.at(1)? == 2, "copy has wrong contents")?;
    *v1.at_mut(0)? = 100;
    ensure(*v2.at(0)? != 100, "copy shares storage with its source")
}

fn move_out() -> Result<()> {
    let mut v1 = DynSeq::new();
    v1.push(1)?;
    v1.push(2)?;
    let mut v2 = DynSeq::new();
    v2.take_from(&mut v1);
    ensure(
        v2.len() == 2 && *v2.at(0)? == 1 && *v2.at(1)? == 2 && v1.len() == 0,
        "move left the wrong state behind",
    )
}

fn growth() -> Result<()> {
    let mut seq = DynSeq::new();
    let mut expected = 1;
    for i in 0..64u32 {
        seq.push(i)?;
        if seq.capacity() != expected {
            expected *= 2;
            debug!("grew to capacity {}", seq.capacity());
        }
        ensure(seq.capacity() == expected, "capacity did not double")?;
    }
    Ok(())
}
