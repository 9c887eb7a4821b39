//! Sample machines shared by the tests of every crate in the workspace.

/// Two states, one map, the smallest useful machine.
pub const MINIMAL: &str = "\
%start Map::Idle
%class Ctx
%map Map {
 Idle {
  Go() Running {}
 }
 Running {
  Stop() [done] Idle {}
 }
}
";

/// The coin operated turnstile, with entry/exit hooks, parameters, guards and `nil`.
pub const TURNSTILE: &str = "\
// Package: Gates
%{
#include <cstdio>
%}
%start Main::Locked
/// A coin operated turnstile.
%class Turnstile
%header Turnstile.h
%include \"Coin.h\"
%map Main
%%
/// Waiting for a coin.
Locked
Entry { lightOff(); }
{
    Coin(amount: int) [amount == 25 && isAccepted(amount)] Unlocked { unlock(); thankYou(amount); }
    Coin(amount: int) nil { refund(amount); }
    Pass() nil { alarm(); }
}

Unlocked
Exit { lightOff(); }
{
    Pass() Locked { lock(); }
    Coin(amount: int) nil { refund(amount); }
}
%%
";

/// A connection machine using overloads, forward references, a declared Default state and
/// `%return`.
pub const CONNECTION: &str = "\
%start Link::Closed
%class Connection
%fsmfile connection_sm
%fsmclass ConnectionFsm
%package net::link
%declare Segment
%return bool
%map Link {
    Closed {
        Open(host: const char*, port: unsigned short) Opening { connect(host, port); }
        Open(address: const Address&) Opening { connect(address); }
    }

    Opening
    Entry { startTimer(\"open\", 30); }
    Exit { stopTimer(\"open\"); }
    {
        Opened() [!isBlocked()] Established {}
        Opened() [retries == 0 || isBlocked()] Closed { fail(\"blocked\"); }
        Timeout() Closed {}
    }

    Established {
        Send(segment: const Segment&) [isWritable()] nil { write(segment); }
        Close() Closing {}
    }

    Default {
        Close() Closed { reset(); }
        Timeout() nil {}
    }
}
";

pub fn all() -> [(&'static str, &'static str); 3] {
    [
        ("minimal", MINIMAL),
        ("turnstile", TURNSTILE),
        ("connection", CONNECTION),
    ]
}
