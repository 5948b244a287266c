use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_spl::token_interface::{
    self as token_interface, Mint, TokenAccount, TokenInterface, TransferChecked,
};
use crate::constants::*;
use super::math::rent_top_up;

/// Moves `amount` from a payer's token account into the vault
/// (payer signs; zero amounts are skipped)
#[inline(never)]
pub fn deposit_to_vault<'info>(
    token_program: &Interface<'info, TokenInterface>,
    from: &InterfaceAccount<'info, TokenAccount>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    token_interface::transfer_checked(
        CpiContext::new(
            token_program.to_account_info(),
            TransferChecked {
                from: from.to_account_info(),
                mint: mint.to_account_info(),
                to: vault.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        amount,
        mint.decimals,
    )
}

/// Pays `amount` out of the vault, signed by the vault authority PDA
#[inline(never)]
pub fn payout_from_vault<'info>(
    token_program: &Interface<'info, TokenInterface>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    vault_authority: &AccountInfo<'info>,
    vault_authority_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, &[vault_authority_bump]];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: vault.to_account_info(),
                mint: mint.to_account_info(),
                to: to.to_account_info(),
                authority: vault_authority.clone(),
            },
            &[seeds],
        ),
        amount,
        mint.decimals,
    )
}

/// Allocates a rent-exempt, program-owned PDA of `space` bytes
///
/// PDA addresses are predictable and may already hold lamports sent by
/// anyone; those are topped up to rent exemption, then allocated and
/// assigned, instead of going through `create_account`.
#[inline(never)]
pub fn create_pda_account<'info>(
    payer: &Signer<'info>,
    account: &AccountInfo<'info>,
    system_program: &Program<'info, System>,
    space: usize,
    seeds: &[&[u8]],
) -> Result<()> {
    let minimum_balance = Rent::get()?.minimum_balance(space);
    let current_lamports = account.lamports();

    if current_lamports == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.to_account_info(),
                CreateAccount {
                    from: payer.to_account_info(),
                    to: account.clone(),
                },
                &[seeds],
            ),
            minimum_balance,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = rent_top_up(minimum_balance, current_lamports);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                Transfer {
                    from: payer.to_account_info(),
                    to: account.clone(),
                },
            ),
            top_up,
        )?;
    }

    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Allocate { account_to_allocate: account.clone() },
            &[seeds],
        ),
        space as u64,
    )?;

    system_program::assign(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Assign { account_to_assign: account.clone() },
            &[seeds],
        ),
        &crate::ID,
    )
}
